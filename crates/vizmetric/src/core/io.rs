//! File I/O and directory traversal.

use crate::core::formats::is_workbook_path;
use crate::{Result, VizmetricError};
use std::path::{Path, PathBuf};

/// Read a file synchronously.
///
/// # Errors
///
/// Returns `VizmetricError::Io` for I/O errors.
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    std::fs::read(path.as_ref()).map_err(VizmetricError::Io)
}

/// Traverse a directory and return all file paths accepted by `filter`.
///
/// # Errors
///
/// Returns `VizmetricError::Validation` if `dir` is not a directory and
/// `VizmetricError::Io` for I/O errors while reading it.
pub fn traverse_directory<F>(dir: impl AsRef<Path>, recursive: bool, filter: Option<F>) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let dir = dir.as_ref();
    let mut files = Vec::new();

    if !dir.is_dir() {
        return Err(VizmetricError::validation(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    traverse_directory_impl(dir, recursive, &filter, &mut files)?;
    Ok(files)
}

fn traverse_directory_impl<F>(dir: &Path, recursive: bool, filter: &Option<F>, files: &mut Vec<PathBuf>) -> Result<()>
where
    F: Fn(&Path) -> bool,
{
    let entries = std::fs::read_dir(dir).map_err(VizmetricError::Io)?;

    for entry in entries {
        let entry = entry.map_err(VizmetricError::Io)?;
        let path = entry.path();

        if path.is_file() {
            let should_include = match filter {
                Some(f) => f(&path),
                None => true,
            };

            if should_include {
                files.push(path);
            }
        } else if path.is_dir() && recursive {
            traverse_directory_impl(&path, recursive, filter, files)?;
        }
    }

    Ok(())
}

/// Find `.twb` and `.twbx` files in a directory, sorted by path.
pub fn find_workbooks(dir: impl AsRef<Path>, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = traverse_directory(dir, recursive, Some(|path: &Path| is_workbook_path(path)))?;
    files.sort();
    Ok(files)
}

/// Identifier used for a workbook in batch results: its file name.
pub fn workbook_identifier(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
