//! Packaged workbook (`.twbx`) handling.
//!
//! A `.twbx` is a zip archive holding one `.twb` document plus data extracts and images.
//! Only the document is read; the first `.twb` entry in archive order wins.

use crate::error::{Result, VizmetricError};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// The workbook document pulled out of a packaged workbook.
#[derive(Debug, Clone)]
pub struct PackagedDocument {
    /// Entry path inside the archive.
    pub entry_name: String,
    pub bytes: Vec<u8>,
}

/// Read the first `.twb` document out of a packaged workbook.
///
/// # Errors
///
/// - `VizmetricError::Parsing` if the bytes are not a readable zip archive
/// - `VizmetricError::UnsupportedFormat` if the archive holds no `.twb` entry
pub fn read_twb_from_twbx(bytes: &[u8]) -> Result<PackagedDocument> {
    let mut archive = open_archive(bytes)?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| VizmetricError::parsing(format!("Failed to read ZIP entry: {}", e)))?;

        if file.is_dir() || !is_twb_entry(file.name()) {
            continue;
        }

        let entry_name = file.name().to_string();
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content).map_err(|e| {
            VizmetricError::parsing_with_source(format!("Failed to read {} from archive", entry_name), e)
        })?;

        tracing::debug!("Using {} from packaged workbook ({} bytes)", entry_name, content.len());
        return Ok(PackagedDocument {
            entry_name,
            bytes: content,
        });
    }

    Err(VizmetricError::UnsupportedFormat(
        "No .twb found inside the .twbx archive".to_string(),
    ))
}

fn open_archive(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| VizmetricError::parsing(format!("Failed to read ZIP archive: {}", e)))
}

fn is_twb_entry(name: &str) -> bool {
    name.to_lowercase().ends_with(".twb")
}
