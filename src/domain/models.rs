use crate::cli::MismatchPolicy;
use crate::mass::{
    AdjustmentError, BaselinePlan, MassSeries, MassValue, Preview, RemainderReport, SumMismatch,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_on_mismatch() -> MismatchPolicy {
    MismatchPolicy::Warn
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Serialize)]
pub struct JsonErr<'a> {
    pub ok: bool,
    pub error: &'a AdjustmentError,
    pub message: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub adjust: AdjustConfig,
}

#[derive(Debug, Deserialize)]
pub struct AdjustConfig {
    #[serde(default = "default_on_mismatch")]
    pub on_mismatch: MismatchPolicy,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        AdjustConfig {
            on_mismatch: default_on_mismatch(),
        }
    }
}

/// Layout of the source, kept so adjusted values can be written back into
/// the same rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum SourceFormat {
    /// One cell per line (also inline arguments).
    Lines,
    /// An array of cells, bare or under `"values"`.
    Json,
    /// Comma-separated with a header row; `column` is the mass column.
    Csv { column: usize },
}

/// One adjustment run, owned by the caller. The original series is kept
/// alongside the adjusted one so both can be reported.
#[derive(Debug, Clone)]
pub struct Session {
    /// `None` for inline values and stdin.
    pub source_path: Option<PathBuf>,
    /// Human-readable label for the source.
    pub source: String,
    pub source_sha256: String,
    pub source_format: SourceFormat,
    /// Source text as read, for write-back.
    pub source_text: String,
    /// 1-based source position of each surviving row.
    pub source_rows: Vec<usize>,
    pub original_series: MassSeries,
    pub adjusted_series: Option<MassSeries>,
}

#[derive(Serialize)]
pub struct RowReport {
    pub row: usize,
    pub original: MassValue,
    pub adjusted: MassValue,
}

#[derive(Serialize)]
pub struct AdjustReport {
    pub source: String,
    pub source_sha256: String,
    pub rows: usize,
    pub original_total: MassValue,
    pub target_total: MassValue,
    pub final_total: MassValue,
    pub baseline: BaselinePlan,
    pub remainder: RemainderReport,
    pub mismatch: Option<SumMismatch>,
    /// File the adjusted source was written to, if any.
    pub output: Option<String>,
    pub values: Vec<RowReport>,
}

#[derive(Serialize)]
pub struct CheckReport {
    pub source: String,
    pub source_sha256: String,
    #[serde(flatten)]
    pub preview: Preview,
}
