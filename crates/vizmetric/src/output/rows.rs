//! Flat row shapes for tabular output.

use crate::types::{SheetRecord, WorkbookSummary};

/// Columns of a per-sheet row. Directory output prepends [`WORKBOOK_COLUMN`].
pub const SHEET_COLUMNS: &[&str] = &[
    "name",
    "mark_types",
    "num_fields_used",
    "dimension_count",
    "measure_count",
    "filter_count",
    "calculated_field_count",
    "has_local_table_calc",
    "has_lod_anywhere",
    "parameter_count",
    "complexity_score",
];

/// Columns of a workbook summary row.
pub const SUMMARY_COLUMNS: &[&str] = &["overall_score", "sheet_count", "max_score", "min_score"];

pub const WORKBOOK_COLUMN: &str = "workbook";

/// One sheet flattened into cells. `field_refs` is reduced to its size.
pub fn sheet_row(record: &SheetRecord) -> Vec<String> {
    vec![
        record.name.clone(),
        record.joined_mark_types(),
        record.field_count().to_string(),
        record.dimension_count.to_string(),
        record.measure_count.to_string(),
        record.filter_count.to_string(),
        record.calculated_field_count.to_string(),
        record.has_local_table_calc.to_string(),
        record.has_lod_anywhere.to_string(),
        record.parameter_count.to_string(),
        record.complexity_score.to_string(),
    ]
}

pub fn summary_row(summary: &WorkbookSummary) -> Vec<String> {
    vec![
        summary.overall_score.to_string(),
        summary.sheet_count.to_string(),
        summary.max_score.to_string(),
        summary.min_score.to_string(),
    ]
}

/// `columns` with the workbook column in front.
pub fn with_workbook_column(columns: &[&str]) -> Vec<String> {
    std::iter::once(WORKBOOK_COLUMN)
        .chain(columns.iter().copied())
        .map(String::from)
        .collect()
}

/// `row` with the workbook identifier in front.
pub fn prefixed(workbook: &str, row: Vec<String>) -> Vec<String> {
    let mut cells = Vec::with_capacity(row.len() + 1);
    cells.push(workbook.to_string());
    cells.extend(row);
    cells
}
