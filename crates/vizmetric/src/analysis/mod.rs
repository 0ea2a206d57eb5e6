//! Heuristic extraction and scoring engine.
//!
//! Data flows leaves-first:
//!
//! 1. [`signals`] scans every calculation in the workbook once for table-calc and LOD markers
//!    and collects parameters
//! 2. [`sheet`] extracts per-worksheet features, using [`marks`] for chart-type inference
//! 3. [`scoring`] turns features plus workbook-wide signals into a score
//! 4. [`workbook`] builds the per-sheet records and the workbook summary
//! 5. [`corpus`] rolls batch outcomes into corpus statistics
//!
//! Nothing in this module performs I/O.

pub mod corpus;
pub mod marks;
pub mod scoring;
pub mod sheet;
pub mod signals;
pub mod workbook;

pub use corpus::aggregate_corpus;
pub use scoring::ScoringWeights;
pub use workbook::{analyze, analyze_with_summary, analyze_with_summary_and_weights, analyze_with_weights, summarize};
