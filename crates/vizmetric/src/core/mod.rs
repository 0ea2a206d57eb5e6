//! Core orchestration module.
//!
//! Everything around the scoring engine that touches the outside world lives here:
//! - **Entry Points**: `analyze_file()` plus concurrent batch and directory runs
//! - **Formats**: Detecting `.twb`/`.twbx` inputs from their extension
//! - **Configuration**: Loading and discovering analysis configuration
//! - **I/O**: File reading and directory traversal
//!
//! # Example
//!
//! ```rust,no_run
//! use vizmetric::core::analyzer::analyze_directory_sync;
//! use vizmetric::core::config::AnalysisConfig;
//!
//! # fn example() -> vizmetric::Result<()> {
//! let outcomes = analyze_directory_sync("workbooks/", &AnalysisConfig::default())?;
//! for outcome in &outcomes {
//!     println!("{}: {}", outcome.workbook, outcome.summary.overall_score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod formats;
pub mod io;

pub use analyzer::{analyze_file, analyze_file_outcome};
#[cfg(feature = "tokio-runtime")]
pub use analyzer::{analyze_directory, analyze_directory_sync, batch_analyze_files, batch_analyze_files_sync};
pub use config::AnalysisConfig;
pub use formats::{WorkbookFormat, detect_format};
