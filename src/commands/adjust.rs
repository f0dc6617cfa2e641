use crate::cli::{Cli, Commands};
use crate::domain::models::ConfigFile;
use crate::services::output::print_one;
use crate::services::session::{
    adjust_report, adjust_session, check_report, open_session, save_session,
};

pub fn handle_commands(cli: &Cli, config: &ConfigFile) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Adjust {
            series,
            on_mismatch,
            output,
        } => {
            let policy = on_mismatch.unwrap_or(config.adjust.on_mismatch);
            let mut session = open_session(series)?;
            let adjustment = adjust_session(&mut session, series.total, policy)?;
            let written = match output {
                Some(requested) => Some(save_session(&session, requested.as_deref())?),
                None => None,
            };
            let report = adjust_report(&session, &adjustment, series.total, written.as_deref());
            print_one(cli.json, report, |r| {
                r.values
                    .iter()
                    .map(|v| v.adjusted.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Commands::Check { series } => {
            let session = open_session(series)?;
            let report = check_report(&session, series.total)?;
            print_one(cli.json, report, |r| {
                let p = &r.preview;
                [
                    format!("rows: {}", p.rows),
                    format!("current total: {}", p.current_total),
                    format!("target total: {}", p.target_total),
                    format!("minimum total: {}", p.minimum_total),
                    format!("diff: {}", p.diff),
                    format!("per-row baseline: {}", p.per_row_baseline),
                    format!("reachable: {}", if p.reachable { "yes" } else { "no" }),
                ]
                .join("\n")
            })?;
        }
    }
    Ok(())
}
