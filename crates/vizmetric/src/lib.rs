//! vizmetric - Heuristic Complexity Scoring for Tableau Workbooks
//!
//! vizmetric reads Tableau workbooks (`.twb` markup or packaged `.twbx` archives), infers
//! per-worksheet chart types, field usage, filters, calculations and parameters, and combines
//! them into a comparable complexity score. Scores roll up into workbook summaries and, for
//! batches, corpus statistics.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vizmetric::{AnalysisConfig, analyze_file};
//!
//! # fn main() -> vizmetric::Result<()> {
//! let analysis = analyze_file("Superstore.twbx", &AnalysisConfig::default())?;
//! for sheet in &analysis.worksheets {
//!     println!("{}: {:?} -> {}", sheet.name, sheet.mark_types, sheet.complexity_score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Working on an already-loaded document:
//!
//! ```rust
//! use vizmetric::extraction::WorkbookDocument;
//!
//! # fn main() -> vizmetric::Result<()> {
//! let doc = WorkbookDocument::parse(r#"<workbook><worksheets><worksheet name="KPI"/></worksheets></workbook>"#)?;
//! let analysis = vizmetric::analyze_with_summary(&doc);
//! assert_eq!(analysis.worksheets[0].mark_types, vec!["text"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Extraction** (`extraction`): Archive handling, decoding and the namespace-agnostic tree
//! - **Analysis** (`analysis`): Signal scanning, sheet features, mark inference, scoring, aggregation
//! - **Core** (`core`): File entry points, concurrent batch runs, configuration
//! - **Output** (`output`): JSON/CSV/TSV writers with summary sidecars

#![deny(unsafe_code)]

pub mod analysis;
pub mod core;
pub mod error;
pub mod extraction;
pub mod output;
pub mod types;

pub use error::{Result, VizmetricError};
pub use types::*;

pub use analysis::scoring::ScoringWeights;
pub use analysis::{aggregate_corpus, analyze, analyze_with_summary, analyze_with_weights, summarize};

pub use core::analyzer::{analyze_file, analyze_file_outcome};
#[cfg(feature = "tokio-runtime")]
pub use core::analyzer::{analyze_directory, analyze_directory_sync, batch_analyze_files, batch_analyze_files_sync};
pub use core::config::AnalysisConfig;
pub use core::formats::{WorkbookFormat, detect_format};
pub use core::io::find_workbooks;

pub use output::{OutputFormat, write_corpus_output, write_directory_output, write_workbook_output};
