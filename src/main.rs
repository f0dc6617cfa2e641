use clap::Parser;
use grossmass::cli::Cli;
use grossmass::commands::handle_commands;
use grossmass::mass::AdjustmentError;
use grossmass::services::output::print_error;
use grossmass::services::storage::load_config;
use grossmass::telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(cli.config.as_deref())?;

    if let Err(err) = handle_commands(&cli, &config) {
        if cli.json {
            if let Some(e) = err.downcast_ref::<AdjustmentError>() {
                print_error(e)?;
                std::process::exit(1);
            }
        }
        return Err(err);
    }
    Ok(())
}
