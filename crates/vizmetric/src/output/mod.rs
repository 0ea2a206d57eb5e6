//! Result serialization to JSON, CSV and TSV files.
//!
//! The output format is chosen from the extension of the requested path. Tabular formats
//! flatten `mark_types` into one `;`-joined cell and write summaries to sidecar files next to
//! the main output:
//!
//! | Input        | `.json`                      | `.csv` / `.tsv`                                        |
//! |--------------|------------------------------|--------------------------------------------------------|
//! | one workbook | `{"summary", "worksheets"}`  | sheet rows + `<stem>_summary.json` + `<stem>_summary.<ext>` |
//! | directory    | array of workbook outcomes   | sheet rows with `workbook` column + `<stem>_summaries.<ext>` |
//! | corpus       | `<stem>_corpus.json`         | `<stem>_corpus.json`                                   |

pub mod rows;
pub mod writer;

use crate::{Result, VizmetricError};
use std::path::{Path, PathBuf};

pub use writer::{write_corpus_output, write_directory_output, write_workbook_output};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    /// Pick the format from the extension of `path` (any case).
    ///
    /// # Errors
    ///
    /// Returns `VizmetricError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some("tsv") => Ok(Self::Tsv),
            _ => Err(VizmetricError::UnsupportedFormat(
                "Unsupported output extension. Use .json, .csv, or .tsv".to_string(),
            )),
        }
    }

    /// Field delimiter for tabular formats.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            Self::Json | Self::Csv => b',',
        }
    }

    pub fn is_tabular(self) -> bool {
        !matches!(self, Self::Json)
    }
}

/// `<dir>/<stem><suffix>.<extension>` next to `out_path`.
pub fn sidecar_path(out_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_path.with_file_name(format!("{}{}.{}", stem, suffix, extension))
}

/// Extension of `out_path` as written, without the dot.
pub(crate) fn original_extension(out_path: &Path) -> String {
    out_path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path("out.json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("out.CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("reports/out.tsv").unwrap(), OutputFormat::Tsv);
        assert!(matches!(
            OutputFormat::from_path("out.xlsx").unwrap_err(),
            VizmetricError::UnsupportedFormat(_)
        ));
        assert!(OutputFormat::from_path("out").is_err());
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(OutputFormat::Csv.delimiter(), b',');
        assert_eq!(OutputFormat::Tsv.delimiter(), b'\t');
        assert!(OutputFormat::Tsv.is_tabular());
        assert!(!OutputFormat::Json.is_tabular());
    }

    #[test]
    fn test_sidecar_path() {
        let out = Path::new("/tmp/reports/sales.csv");
        assert_eq!(
            sidecar_path(out, "_summary", "json"),
            PathBuf::from("/tmp/reports/sales_summary.json")
        );
        assert_eq!(
            sidecar_path(out, "_summaries", "csv"),
            PathBuf::from("/tmp/reports/sales_summaries.csv")
        );
    }
}
