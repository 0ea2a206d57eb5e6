//! Loading workbook markup from disk or memory.

use crate::core::formats::{WorkbookFormat, detect_format};
use crate::error::Result;
use crate::extraction::archive::read_twb_from_twbx;
use crate::extraction::xml::WorkbookDocument;
use std::path::Path;

/// Decoded workbook markup, ready to be parsed.
///
/// The markup is owned here so that [`WorkbookDocument`] can borrow from it.
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    pub format: WorkbookFormat,
    /// Archive entry the markup came from, for `.twbx` inputs.
    pub entry_name: Option<String>,
    pub text: String,
}

impl WorkbookSource {
    /// Parse the markup into a queryable document.
    pub fn parse(&self) -> Result<WorkbookDocument<'_>> {
        WorkbookDocument::parse(&self.text)
    }
}

/// Materialize workbook markup from raw file bytes.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn load_workbook_bytes(bytes: &[u8], format: WorkbookFormat) -> Result<WorkbookSource> {
    match format {
        WorkbookFormat::Twb => Ok(WorkbookSource {
            format,
            entry_name: None,
            text: String::from_utf8_lossy(bytes).into_owned(),
        }),
        WorkbookFormat::Twbx => {
            let packaged = read_twb_from_twbx(bytes)?;
            Ok(WorkbookSource {
                format,
                entry_name: Some(packaged.entry_name),
                text: String::from_utf8_lossy(&packaged.bytes).into_owned(),
            })
        }
    }
}

/// Materialize workbook markup from a `.twb` or `.twbx` file.
///
/// # Errors
///
/// - `VizmetricError::UnsupportedFormat` for other extensions or archives without a `.twb`
/// - `VizmetricError::Io` if the file cannot be read
/// - `VizmetricError::Parsing` for corrupt archives
pub fn load_workbook_file(path: impl AsRef<Path>) -> Result<WorkbookSource> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let bytes = crate::core::io::read_file_sync(path)?;
    load_workbook_bytes(&bytes, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VizmetricError;
    use tempfile::tempdir;

    #[test]
    fn test_load_twb_bytes_replaces_invalid_utf8() {
        let source = load_workbook_bytes(b"<workbook name='\xFF'/>", WorkbookFormat::Twb).unwrap();
        assert!(source.text.contains('\u{FFFD}'));
        assert!(source.entry_name.is_none());
        assert!(source.parse().is_ok());
    }

    #[test]
    fn test_load_file_rejects_unknown_extension_before_reading() {
        let err = load_workbook_file("/nonexistent/book.xlsx").unwrap_err();
        assert!(matches!(err, VizmetricError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_workbook_file("/nonexistent/book.twb").unwrap_err();
        assert!(matches!(err, VizmetricError::Io(_)));
    }

    #[test]
    fn test_load_twb_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book.twb");
        std::fs::write(&path, "<workbook><worksheets/></workbook>").unwrap();

        let source = load_workbook_file(&path).unwrap();
        assert_eq!(source.format, WorkbookFormat::Twb);
        assert_eq!(source.parse().unwrap().root().local_name(), "workbook");
    }
}
