use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::VizmetricError;

/// Delimiter used when `mark_types` is flattened into a single tabular cell.
pub const MARK_TYPE_DELIMITER: char = ';';

/// Tag used when no inference layer produced a mark type.
pub const UNKNOWN_MARK_TYPE: &str = "unknown";

/// Name reported for worksheets without a `name` or `caption` attribute.
pub const UNNAMED_SHEET: &str = "(unnamed)";

/// Metadata and complexity score for one worksheet.
///
/// `has_lod_anywhere` and `parameter_count` are workbook-wide values repeated on every
/// record of the same workbook. `has_local_table_calc` only looks at calculations nested
/// under this sheet's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    pub name: String,
    /// Normalized chart-type tags, sorted. Never empty.
    pub mark_types: Vec<String>,
    /// Distinct field identifiers as they appear in the markup (brackets kept).
    pub field_refs: BTreeSet<String>,
    pub dimension_count: usize,
    pub measure_count: usize,
    pub filter_count: usize,
    pub calculated_field_count: usize,
    pub has_local_table_calc: bool,
    pub has_lod_anywhere: bool,
    pub parameter_count: usize,
    pub complexity_score: f64,
}

impl SheetRecord {
    /// Number of distinct fields referenced by the sheet.
    pub fn field_count(&self) -> usize {
        self.field_refs.len()
    }

    /// `mark_types` joined with [`MARK_TYPE_DELIMITER`] for tabular formats.
    pub fn joined_mark_types(&self) -> String {
        join_mark_types(&self.mark_types)
    }
}

/// Join mark type tags into a single `;`-delimited cell.
pub fn join_mark_types<S: AsRef<str>>(mark_types: &[S]) -> String {
    mark_types
        .iter()
        .map(|m| m.as_ref())
        .collect::<Vec<_>>()
        .join(&MARK_TYPE_DELIMITER.to_string())
}

/// Split a `;`-delimited mark type cell back into tags. Empty segments are dropped.
pub fn split_mark_types(cell: &str) -> Vec<String> {
    cell.split(MARK_TYPE_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Per-workbook rollup of sheet scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkbookSummary {
    pub overall_score: f64,
    pub sheet_count: usize,
    pub max_score: f64,
    pub min_score: f64,
}

/// Result of analyzing one workbook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookAnalysis {
    pub summary: WorkbookSummary,
    pub worksheets: Vec<SheetRecord>,
}

/// Error details attached to a failed workbook in batch results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetadata {
    pub error_type: String,
    pub message: String,
}

impl From<&VizmetricError> for ErrorMetadata {
    fn from(err: &VizmetricError) -> Self {
        Self {
            error_type: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// One entry of a batch run: either a successful analysis or a captured failure.
///
/// Failed workbooks carry a zeroed summary and no worksheets so that batch output keeps
/// one record per input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookOutcome {
    /// Workbook identifier, the file name in directory runs.
    pub workbook: String,
    pub summary: WorkbookSummary,
    pub worksheets: Vec<SheetRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMetadata>,
}

impl WorkbookOutcome {
    pub fn success(workbook: impl Into<String>, analysis: WorkbookAnalysis) -> Self {
        Self {
            workbook: workbook.into(),
            summary: analysis.summary,
            worksheets: analysis.worksheets,
            error: None,
        }
    }

    pub fn failure(workbook: impl Into<String>, err: &VizmetricError) -> Self {
        Self {
            workbook: workbook.into(),
            summary: WorkbookSummary::default(),
            worksheets: Vec::new(),
            error: Some(ErrorMetadata::from(err)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Cross-workbook statistics for a corpus run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub num_workbooks: usize,
    pub total_sheets: usize,
    pub overall_score_avg: f64,
    pub overall_score_min: f64,
    pub overall_score_max: f64,
    pub sheet_complexity_avg: f64,
    pub sheets_with_table_calc_pct: f64,
    pub sheets_with_lod_pct: f64,
    pub errors_count: usize,
    /// `(mark type, occurrences)` pairs, most frequent first, at most ten.
    pub top_mark_types: Vec<(String, usize)>,
}
