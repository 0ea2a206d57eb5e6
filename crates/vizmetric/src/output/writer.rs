//! Output file writers.
//!
//! Each writer returns every path it wrote, main output first.

use crate::output::rows::{
    SHEET_COLUMNS, SUMMARY_COLUMNS, prefixed, sheet_row, summary_row, with_workbook_column,
};
use crate::output::{OutputFormat, original_extension, sidecar_path};
use crate::types::{CorpusSummary, WorkbookAnalysis, WorkbookOutcome};
use crate::{Result, VizmetricError};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(VizmetricError::Io)
}

fn write_table<H, R>(path: &Path, format: OutputFormat, header: &[H], rows: R) -> Result<()>
where
    H: AsRef<str>,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;

    writer.write_record(header.iter().map(|h| h.as_ref()))?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(VizmetricError::Io)
}

/// Write a single workbook analysis.
///
/// JSON gets `{"summary", "worksheets"}`. CSV/TSV get one row per sheet, plus the summary as
/// `<stem>_summary.json` and a one-row `<stem>_summary.<ext>`.
///
/// # Errors
///
/// Returns `VizmetricError::UnsupportedFormat` for extensions other than `.json`, `.csv` or
/// `.tsv`, and `VizmetricError::Io` / `VizmetricError::Serialization` on write failures.
pub fn write_workbook_output(analysis: &WorkbookAnalysis, out_path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let out_path = out_path.as_ref();
    let format = OutputFormat::from_path(out_path)?;

    if !format.is_tabular() {
        write_json(analysis, out_path)?;
        return Ok(vec![out_path.to_path_buf()]);
    }

    write_table(out_path, format, SHEET_COLUMNS, analysis.worksheets.iter().map(sheet_row))?;

    let summary_json = sidecar_path(out_path, "_summary", "json");
    write_json(&analysis.summary, &summary_json)?;

    let summary_table = sidecar_path(out_path, "_summary", &original_extension(out_path));
    write_table(&summary_table, format, SUMMARY_COLUMNS, [summary_row(&analysis.summary)])?;

    tracing::debug!(
        "Wrote {} sheet rows to {} with summary sidecars",
        analysis.worksheets.len(),
        out_path.display()
    );
    Ok(vec![out_path.to_path_buf(), summary_json, summary_table])
}

/// Write the outcomes of a directory run.
///
/// JSON gets an array of outcomes. CSV/TSV get every sheet of every successful workbook with a
/// leading `workbook` column, plus `<stem>_summaries.<ext>` with one row per workbook. Failed
/// workbooks appear in the summaries with zeroed statistics.
pub fn write_directory_output(outcomes: &[WorkbookOutcome], out_path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let out_path = out_path.as_ref();
    let format = OutputFormat::from_path(out_path)?;

    if !format.is_tabular() {
        write_json(outcomes, out_path)?;
        return Ok(vec![out_path.to_path_buf()]);
    }

    let sheet_rows = outcomes.iter().flat_map(|outcome| {
        outcome
            .worksheets
            .iter()
            .map(|sheet| prefixed(&outcome.workbook, sheet_row(sheet)))
    });
    write_table(out_path, format, &with_workbook_column(SHEET_COLUMNS), sheet_rows)?;

    let summaries_path = sidecar_path(out_path, "_summaries", &original_extension(out_path));
    let summary_rows = outcomes
        .iter()
        .map(|outcome| prefixed(&outcome.workbook, summary_row(&outcome.summary)));
    write_table(&summaries_path, format, &with_workbook_column(SUMMARY_COLUMNS), summary_rows)?;

    tracing::debug!(
        "Wrote {} workbook results to {} and {}",
        outcomes.len(),
        out_path.display(),
        summaries_path.display()
    );
    Ok(vec![out_path.to_path_buf(), summaries_path])
}

/// Write the corpus summary as `<stem>_corpus.json` next to `out_path`.
pub fn write_corpus_output(corpus: &CorpusSummary, out_path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = sidecar_path(out_path.as_ref(), "_corpus", "json");
    write_json(corpus, &path)?;
    Ok(path)
}
