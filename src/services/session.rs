use crate::cli::{MismatchPolicy, SeriesArgs};
use crate::domain::models::{AdjustReport, CheckReport, RowReport, Session};
use crate::mass::{self, Adjustment, AdjustmentError, MassSeries, MassValue};
use crate::services::input::{parse_source, parse_text_cells};
use crate::services::storage::{inline_source, read_source};
use crate::services::writeback::{default_output_path, write_adjusted};
use std::path::{Path, PathBuf};

/// Load the series named by the command line into a fresh session.
pub fn open_session(args: &SeriesArgs) -> anyhow::Result<Session> {
    let raw = match &args.input {
        Some(path) => read_source(path)?,
        None => inline_source(&args.values),
    };
    let text = String::from_utf8_lossy(&raw.bytes).into_owned();
    let parsed = match &args.input {
        Some(_) => parse_source(&text, raw.path.as_deref())?,
        None => parse_text_cells(args.values.iter().map(String::as_str))?,
    };
    tracing::info!(source = %raw.label, rows = parsed.series.len(), "series loaded");

    Ok(Session {
        source_sha256: raw.sha256(),
        source_path: raw.path,
        source: raw.label,
        source_format: parsed.format,
        source_text: text,
        source_rows: parsed.rows,
        original_series: parsed.series,
        adjusted_series: None,
    })
}

/// Run the adjustment and record the result on the session.
pub fn adjust_session(
    session: &mut Session,
    target: MassValue,
    on_mismatch: MismatchPolicy,
) -> anyhow::Result<Adjustment> {
    let adjustment = mass::adjust(&session.original_series, target)?;
    session.adjusted_series = Some(settle(&adjustment, on_mismatch)?);
    tracing::info!(
        rows = adjustment.series.len(),
        final_total = %adjustment.series.total(),
        "adjustment finished"
    );
    Ok(adjustment)
}

/// Apply the mismatch policy: `reject` goes through `into_strict`.
fn settle(
    adjustment: &Adjustment,
    on_mismatch: MismatchPolicy,
) -> Result<MassSeries, AdjustmentError> {
    match on_mismatch {
        MismatchPolicy::Reject => adjustment.clone().into_strict(),
        MismatchPolicy::Warn => Ok(adjustment.series.clone()),
    }
}

/// Where `--output` writes: the given path, or `Adjusted_<name>` beside the
/// input when the flag has no value.
pub fn output_path(session: &Session, requested: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = requested {
        return Ok(path.to_path_buf());
    }
    session
        .source_path
        .as_deref()
        .and_then(default_output_path)
        .ok_or_else(|| anyhow::anyhow!("--output needs a path when the input is not a file"))
}

/// Write the adjusted values back into a copy of the source; returns the
/// path written.
pub fn save_session(session: &Session, requested: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = output_path(session, requested)?;
    write_adjusted(session, &path)?;
    Ok(path)
}

pub fn adjust_report(
    session: &Session,
    adjustment: &Adjustment,
    target: MassValue,
    output: Option<&Path>,
) -> AdjustReport {
    let values = session
        .source_rows
        .iter()
        .zip(session.original_series.iter())
        .zip(adjustment.series.iter())
        .map(|((row, original), adjusted)| RowReport {
            row: *row,
            original: *original,
            adjusted: *adjusted,
        })
        .collect();

    AdjustReport {
        source: session.source.clone(),
        source_sha256: session.source_sha256.clone(),
        rows: session.original_series.len(),
        original_total: session.original_series.total(),
        target_total: target,
        final_total: adjustment.series.total(),
        baseline: adjustment.baseline,
        remainder: adjustment.remainder,
        mismatch: adjustment.mismatch,
        output: output.map(|p| p.display().to_string()),
        values,
    }
}

pub fn check_report(session: &Session, target: MassValue) -> anyhow::Result<CheckReport> {
    let preview = mass::preview(&session.original_series, target)?;
    Ok(CheckReport {
        source: session.source.clone(),
        source_sha256: session.source_sha256.clone(),
        preview,
    })
}
