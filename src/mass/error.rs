use super::units::MassValue;
use serde::Serialize;

/// Failures of a single adjustment call.
///
/// Serializes with a `kind` tag so callers can render their own message from
/// the structured fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjustmentError {
    #[error("no rows found for GrossMassKg")]
    NoRowsFound,

    #[error("target total too small: minimum possible total for {rows} rows is {minimum}")]
    TargetTooSmall { rows: usize, minimum: MassValue },

    #[error("column {header:?} not found (case-insensitive, spaces ignored)")]
    ColumnNotFound { header: String },

    #[error("total of {rows} rows is out of range")]
    OutOfRange { rows: usize },

    #[error("row {row}: value {value:?} cannot be converted to a mass")]
    InvalidValue { row: usize, value: String },

    #[error("cannot remove {remaining_steps} more steps: all {rows} rows are at the minimum floor")]
    Unsatisfiable { remaining_steps: u64, rows: usize },

    #[error("final sum mismatch: final {final_total}, target {target_total}")]
    SumMismatch {
        final_total: MassValue,
        target_total: MassValue,
    },
}

/// Non-fatal post-check finding: the adjusted series does not add up to the
/// target. The series is still handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SumMismatch {
    pub final_total: MassValue,
    pub target_total: MassValue,
}

impl From<SumMismatch> for AdjustmentError {
    fn from(m: SumMismatch) -> Self {
        AdjustmentError::SumMismatch {
            final_total: m.final_total,
            target_total: m.target_total,
        }
    }
}
