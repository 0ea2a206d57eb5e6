//! Workbook format detection.
//!
//! Tableau workbooks come in two containers: a bare XML document (`.twb`) and a packaged
//! zip archive (`.twbx`) that bundles the document with extracts and images.

use crate::{Result, VizmetricError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TWB_EXTENSION: &str = "twb";
pub const TWBX_EXTENSION: &str = "twbx";

/// Container format of a workbook file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkbookFormat {
    /// Bare workbook markup.
    Twb,
    /// Zip archive holding a `.twb` entry.
    Twbx,
}

impl WorkbookFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            TWB_EXTENSION => Some(Self::Twb),
            TWBX_EXTENSION => Some(Self::Twbx),
            _ => None,
        }
    }
}

/// Detect the workbook format of `path` from its extension.
///
/// # Errors
///
/// Returns `VizmetricError::UnsupportedFormat` for any extension other than `.twb`/`.twbx`.
pub fn detect_format(path: impl AsRef<Path>) -> Result<WorkbookFormat> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|ext| ext.to_str());

    match extension.and_then(WorkbookFormat::from_extension) {
        Some(format) => Ok(format),
        None => Err(VizmetricError::UnsupportedFormat(format!(
            "Unsupported file type for {}. Use .twb or .twbx",
            path.display()
        ))),
    }
}

/// Whether `path` has a workbook extension. Used when scanning directories.
pub fn is_workbook_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(WorkbookFormat::from_extension)
        .is_some()
}
