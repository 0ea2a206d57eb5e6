//! Cross-workbook aggregation.

use crate::analysis::scoring::round_to;
use crate::types::{CorpusSummary, SheetRecord, WorkbookOutcome};
use indexmap::IndexMap;

/// Number of entries reported in `top_mark_types`.
pub const TOP_MARK_TYPES: usize = 10;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn percentage(matching: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round_to(matching as f64 / total as f64 * 100.0, 1)
    }
}

/// Count mark types across sheets. Ties keep first-seen order.
pub fn top_mark_types<'a, I>(sheets: I, limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a SheetRecord>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for sheet in sheets {
        for mark in &sheet.mark_types {
            *counts.entry(mark.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().map(|(tag, n)| (tag.to_string(), n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Aggregate batch outcomes into corpus statistics.
///
/// Failed workbooks contribute their zeroed `overall_score` to the overall-score statistics.
/// They carry no sheets, so sheet totals and percentages come from successful workbooks only.
pub fn aggregate_corpus(outcomes: &[WorkbookOutcome]) -> CorpusSummary {
    if outcomes.is_empty() {
        return CorpusSummary::default();
    }

    let errors_count = outcomes.iter().filter(|o| o.is_error()).count();

    let overall_scores: Vec<f64> = outcomes.iter().map(|o| o.summary.overall_score).collect();
    let sheets: Vec<&SheetRecord> = outcomes.iter().flat_map(|o| o.worksheets.iter()).collect();
    let sheet_scores: Vec<f64> = sheets.iter().map(|s| s.complexity_score).collect();

    let total_sheets = sheets.len();
    let with_table_calc = sheets.iter().filter(|s| s.has_local_table_calc).count();
    let with_lod = sheets.iter().filter(|s| s.has_lod_anywhere).count();

    let (overall_score_min, overall_score_max) = if overall_scores.is_empty() {
        (0.0, 0.0)
    } else {
        (
            round_to(overall_scores.iter().copied().fold(f64::INFINITY, f64::min), 2),
            round_to(overall_scores.iter().copied().fold(f64::NEG_INFINITY, f64::max), 2),
        )
    };

    let summary = CorpusSummary {
        num_workbooks: outcomes.len(),
        total_sheets,
        overall_score_avg: round_to(mean(&overall_scores), 2),
        overall_score_min,
        overall_score_max,
        sheet_complexity_avg: round_to(mean(&sheet_scores), 2),
        sheets_with_table_calc_pct: percentage(with_table_calc, total_sheets),
        sheets_with_lod_pct: percentage(with_lod, total_sheets),
        errors_count,
        top_mark_types: top_mark_types(sheets.iter().copied(), TOP_MARK_TYPES),
    };

    tracing::debug!(
        "Corpus: {} workbooks ({} failed), {} sheets",
        summary.num_workbooks,
        summary.errors_count,
        summary.total_sheets
    );
    summary
}
