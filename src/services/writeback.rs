//! Write adjusted values back into the rows they came from.
//!
//! Only the mass cells of surviving rows change. Blank rows, other CSV
//! columns and other JSON keys are carried over as read.

use crate::domain::models::{Session, SourceFormat};
use crate::mass::{MassSeries, MassValue};
use crate::services::input::CSV_FIRST_DATA_ROW;
use crate::services::storage::write_output;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `Adjusted_<file name>` next to the input.
pub fn default_output_path(input: &Path) -> Option<PathBuf> {
    let name = input.file_name()?.to_str()?;
    Some(input.with_file_name(format!("Adjusted_{}", name)))
}

/// Render the adjusted session in its source layout and write it to `path`.
pub fn write_adjusted(session: &Session, path: &Path) -> anyhow::Result<()> {
    let adjusted = session
        .adjusted_series
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("session has no adjusted values to write"))?;
    let text = render_adjusted(
        &session.source_text,
        session.source_format,
        &session.source_rows,
        adjusted,
    )?;
    write_output(path, &text)
}

pub fn render_adjusted(
    source: &str,
    format: SourceFormat,
    rows: &[usize],
    adjusted: &MassSeries,
) -> anyhow::Result<String> {
    let cells: Vec<(usize, MassValue)> = rows.iter().copied().zip(adjusted.iter().copied()).collect();
    match format {
        SourceFormat::Lines => Ok(render_lines(source, &cells)),
        SourceFormat::Json => render_json(source, &cells),
        SourceFormat::Csv { column } => render_csv(source, column, &cells),
    }
}

fn render_lines(source: &str, cells: &[(usize, MassValue)]) -> String {
    let mut lines: Vec<String> = source.lines().map(str::to_string).collect();
    for (row, value) in cells {
        if let Some(line) = lines.get_mut(row - 1) {
            *line = value.to_string();
        }
    }
    let mut out = lines.join("\n");
    if source.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn render_json(source: &str, cells: &[(usize, MassValue)]) -> anyhow::Result<String> {
    let mut doc: Value = serde_json::from_str(source.trim_start())?;
    let slots = match &mut doc {
        Value::Array(slots) => slots,
        Value::Object(obj) => match obj.get_mut("values") {
            Some(Value::Array(slots)) => slots,
            _ => anyhow::bail!("expected a JSON array or an object with a \"values\" array"),
        },
        _ => anyhow::bail!("expected a JSON array or an object with a \"values\" array"),
    };
    for (row, value) in cells {
        if let Some(slot) = slots.get_mut(row - 1) {
            *slot = serde_json::to_value(value)?;
        }
    }
    let mut out = serde_json::to_string_pretty(&doc)?;
    out.push('\n');
    Ok(out)
}

fn render_csv(source: &str, column: usize, cells: &[(usize, MassValue)]) -> anyhow::Result<String> {
    let by_record: HashMap<usize, MassValue> = cells
        .iter()
        .map(|(row, value)| (row - CSV_FIRST_DATA_ROW, *value))
        .collect();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source.as_bytes());
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    writer.write_record(reader.headers()?)?;
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        match by_record.get(&i) {
            Some(value) => {
                let adjusted = value.to_string();
                let fields: Vec<&str> = record
                    .iter()
                    .enumerate()
                    .map(|(c, field)| if c == column { adjusted.as_str() } else { field })
                    .collect();
                writer.write_record(&fields)?;
            }
            None => writer.write_record(&record)?,
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush csv output: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
