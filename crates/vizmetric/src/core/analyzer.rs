//! Main analysis entry points.
//!
//! This module ties loading, parsing and the scoring engine together for files on disk, and
//! drives concurrent batch runs over many workbooks.
//!
//! # Functions
//!
//! - [`analyze_file`] - Analyze a single `.twb`/`.twbx` file
//! - [`batch_analyze_files`] - Analyze multiple files concurrently
//! - [`analyze_directory`] - Find and analyze every workbook in a directory

use crate::analysis::workbook::analyze_with_summary_and_weights;
use crate::core::config::AnalysisConfig;
use crate::core::io::workbook_identifier;
use crate::extraction::source::load_workbook_file;
use crate::types::{WorkbookAnalysis, WorkbookOutcome};
use crate::Result;
use std::path::Path;

#[cfg(feature = "tokio-runtime")]
use crate::VizmetricError;
#[cfg(feature = "tokio-runtime")]
use crate::core::io::find_workbooks;
#[cfg(feature = "tokio-runtime")]
use once_cell::sync::Lazy;

/// Global Tokio runtime for synchronous batch wrappers.
///
/// Lazily initialized on first use and shared across all sync wrappers. Runtime creation only
/// fails when the system is out of resources, in which case nothing else would work either.
#[cfg(feature = "tokio-runtime")]
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Analyze a workbook file.
///
/// # Errors
///
/// - `VizmetricError::UnsupportedFormat` for extensions other than `.twb`/`.twbx`, or an
///   archive without a `.twb` entry
/// - `VizmetricError::Io` if the file cannot be read
/// - `VizmetricError::Parsing` for malformed markup or a corrupt archive
///
/// # Example
///
/// ```rust,no_run
/// use vizmetric::core::analyzer::analyze_file;
/// use vizmetric::core::config::AnalysisConfig;
///
/// # fn example() -> vizmetric::Result<()> {
/// let analysis = analyze_file("Sales.twbx", &AnalysisConfig::default())?;
/// println!("overall score: {}", analysis.summary.overall_score);
/// # Ok(())
/// # }
/// ```
pub fn analyze_file(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<WorkbookAnalysis> {
    let path = path.as_ref();
    let source = load_workbook_file(path)?;
    let doc = source.parse()?;
    let analysis = analyze_with_summary_and_weights(&doc, &config.weights);

    tracing::debug!(
        "Analyzed {}: {} worksheets, overall score {}",
        path.display(),
        analysis.summary.sheet_count,
        analysis.summary.overall_score
    );
    Ok(analysis)
}

/// Analyze a file and fold any failure into the outcome.
pub fn analyze_file_outcome(path: impl AsRef<Path>, config: &AnalysisConfig) -> WorkbookOutcome {
    let path = path.as_ref();
    let name = workbook_identifier(path);
    match analyze_file(path, config) {
        Ok(analysis) => WorkbookOutcome::success(name, analysis),
        Err(e) => {
            tracing::warn!("Failed to analyze {}: {}", path.display(), e);
            WorkbookOutcome::failure(name, &e)
        }
    }
}

/// Analyze multiple workbook files concurrently.
///
/// Concurrency is bounded by `AnalysisConfig::max_concurrent_analyses` (default
/// `num_cpus * 2`), and the CPU-bound work runs on the blocking pool.
///
/// # Returns
///
/// One `WorkbookOutcome` per path, in the same order as the input paths.
///
/// # Errors
///
/// Per-file failures of any kind are captured in the outcome's `error` field and never abort
/// the batch. Only a panicking analysis task fails the whole call.
#[cfg(feature = "tokio-runtime")]
pub async fn batch_analyze_files(paths: Vec<impl AsRef<Path>>, config: &AnalysisConfig) -> Result<Vec<WorkbookOutcome>> {
    use std::sync::Arc;
    use tokio::sync::Semaphore;
    use tokio::task::JoinSet;

    if paths.is_empty() {
        return Ok(vec![]);
    }

    let config = Arc::new(config.clone());
    let semaphore = Arc::new(Semaphore::new(config.concurrency_limit()));
    tracing::info!("Analyzing {} workbooks", paths.len());

    let mut tasks = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let path_buf = path.as_ref().to_path_buf();
        let config_clone = Arc::clone(&config);
        let semaphore_clone = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore_clone.acquire_owned().await;
            let outcome = tokio::task::spawn_blocking(move || analyze_file_outcome(&path_buf, &config_clone)).await;
            (index, outcome)
        });
    }

    let mut results: Vec<Option<WorkbookOutcome>> = vec![None; tasks.len()];

    while let Some(task_result) = tasks.join_next().await {
        match task_result {
            Ok((index, Ok(outcome))) => {
                results[index] = Some(outcome);
            }
            Ok((_, Err(join_err))) | Err(join_err) => {
                return Err(VizmetricError::Other(format!("Task panicked: {}", join_err)));
            }
        }
    }

    let outcomes: Vec<WorkbookOutcome> = results
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| VizmetricError::Other("Batch finished with missing results".to_string()))?;

    let failed = outcomes.iter().filter(|o| o.is_error()).count();
    tracing::info!("Analyzed {} workbooks ({} failed)", outcomes.len(), failed);
    Ok(outcomes)
}

/// Find every workbook under `dir` and analyze them concurrently.
///
/// Subdirectories are searched when `config.recursive` is set. Outcomes are ordered by path.
///
/// # Errors
///
/// Returns `VizmetricError::Validation` if `dir` is not a directory.
#[cfg(feature = "tokio-runtime")]
pub async fn analyze_directory(dir: impl AsRef<Path>, config: &AnalysisConfig) -> Result<Vec<WorkbookOutcome>> {
    let paths = find_workbooks(dir.as_ref(), config.recursive)?;
    tracing::debug!("Found {} workbooks in {}", paths.len(), dir.as_ref().display());
    batch_analyze_files(paths, config).await
}

/// Synchronous wrapper for `batch_analyze_files`.
///
/// Uses the global Tokio runtime instead of creating one per call.
#[cfg(feature = "tokio-runtime")]
pub fn batch_analyze_files_sync(paths: Vec<impl AsRef<Path>>, config: &AnalysisConfig) -> Result<Vec<WorkbookOutcome>> {
    GLOBAL_RUNTIME.block_on(batch_analyze_files(paths, config))
}

/// Synchronous wrapper for `analyze_directory`.
#[cfg(feature = "tokio-runtime")]
pub fn analyze_directory_sync(dir: impl AsRef<Path>, config: &AnalysisConfig) -> Result<Vec<WorkbookOutcome>> {
    GLOBAL_RUNTIME.block_on(analyze_directory(dir, config))
}
