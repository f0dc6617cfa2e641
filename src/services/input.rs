//! Turn a raw source into a dense series.
//!
//! Blank cells are absent rows, not errors. Every other cell must be a
//! finite non-negative number, otherwise the whole load fails with
//! `InvalidValue` carrying the 1-based source row.
//!
//! Row numbers: line number for text, array position for JSON, and the
//! spreadsheet-style row for CSV (header is row 1, first record row 2).

use crate::domain::models::SourceFormat;
use crate::mass::{AdjustmentError, MassSeries, MassValue};
use serde_json::Value;
use std::path::Path;

/// Header of the mass column in tabular sources, before normalization.
pub const MASS_HEADER: &str = "GrossMassKg";

/// Row number of the first CSV record.
pub const CSV_FIRST_DATA_ROW: usize = 2;

/// Parsed series with the source position of each row.
#[derive(Debug, PartialEq)]
pub struct ParsedSeries {
    pub format: SourceFormat,
    pub rows: Vec<usize>,
    pub series: MassSeries,
}

impl ParsedSeries {
    fn from_cells(format: SourceFormat, cells: Vec<(usize, MassValue)>) -> Self {
        let (rows, values): (Vec<usize>, Vec<MassValue>) = cells.into_iter().unzip();
        ParsedSeries {
            format,
            rows,
            series: MassSeries::new(values),
        }
    }
}

/// Pick the reader for a source: CSV by `.csv` extension, JSON when the text
/// starts with `[` or `{`, otherwise one cell per line.
pub fn parse_source(text: &str, path: Option<&Path>) -> anyhow::Result<ParsedSeries> {
    let is_csv = path
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return parse_csv_series(text);
    }
    parse_series(text)
}

/// JSON when the text starts with `[` or `{`, otherwise one cell per line.
pub fn parse_series(text: &str) -> anyhow::Result<ParsedSeries> {
    let head = text.trim_start();
    if head.starts_with('[') || head.starts_with('{') {
        return parse_json_series(head);
    }
    Ok(parse_text_cells(text.lines())?)
}

/// Cells given one per item, e.g. positional arguments.
pub fn parse_text_cells<'a>(
    cells: impl IntoIterator<Item = &'a str>,
) -> Result<ParsedSeries, AdjustmentError> {
    let cells = cells
        .into_iter()
        .enumerate()
        .filter(|(_, cell)| !cell.trim().is_empty())
        .map(|(i, cell)| parse_cell(i + 1, cell).map(|v| (i + 1, v)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParsedSeries::from_cells(SourceFormat::Lines, cells))
}

/// `GrossMassKg` matched case-insensitively with whitespace removed.
pub fn is_mass_header(header: &str) -> bool {
    let normalized: String = header
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    normalized == MASS_HEADER.to_lowercase()
}

/// Read the first column whose header is the mass header; every other
/// column is ignored. Short records count as a blank cell.
pub fn parse_csv_series(text: &str) -> anyhow::Result<ParsedSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let column = reader
        .headers()?
        .iter()
        .position(is_mass_header)
        .ok_or_else(|| AdjustmentError::ColumnNotFound {
            header: MASS_HEADER.to_string(),
        })?;

    let mut cells = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + CSV_FIRST_DATA_ROW;
        match record.get(column) {
            Some(cell) if !cell.trim().is_empty() => cells.push((row, parse_cell(row, cell)?)),
            _ => continue,
        }
    }
    Ok(ParsedSeries::from_cells(SourceFormat::Csv { column }, cells))
}

fn parse_json_series(text: &str) -> anyhow::Result<ParsedSeries> {
    let doc: Value = serde_json::from_str(text)?;
    let cells = match doc {
        Value::Array(cells) => cells,
        Value::Object(mut obj) => match obj.remove("values") {
            Some(Value::Array(cells)) => cells,
            _ => anyhow::bail!("expected a JSON array or an object with a \"values\" array"),
        },
        _ => anyhow::bail!("expected a JSON array or an object with a \"values\" array"),
    };

    let mut parsed = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let row = i + 1;
        let value = match cell {
            Value::Null => continue,
            Value::String(s) if s.trim().is_empty() => continue,
            Value::String(s) => parse_cell(row, s)?,
            Value::Number(n) => n
                .as_f64()
                .and_then(|f| MassValue::from_f64(f).ok())
                .ok_or_else(|| invalid(row, &n.to_string()))?,
            other => return Err(invalid(row, &other.to_string()).into()),
        };
        parsed.push((row, value));
    }
    Ok(ParsedSeries::from_cells(SourceFormat::Json, parsed))
}

fn parse_cell(row: usize, cell: &str) -> Result<MassValue, AdjustmentError> {
    cell.parse::<MassValue>().map_err(|_| invalid(row, cell))
}

fn invalid(row: usize, value: &str) -> AdjustmentError {
    AdjustmentError::InvalidValue {
        row,
        value: value.to_string(),
    }
}
