//! Built-in storage backends.
//!
//! Each submodule exposes a `backend()` factory the resolver registers at
//! construction. Both backends persist to plain files and share the same
//! write discipline: saves go to a temporary sibling file first and are
//! renamed into place, so a failed save never truncates an existing book.

use std::fs;
use std::path::Path;

use crate::error::{Result, RoloError};

pub mod csv;
pub mod json;

/// Atomically replace the file at `location` with `content`.
pub(crate) fn write_atomic(location: &str, content: &str) -> Result<()> {
    let path = Path::new(location);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| RoloError::io(location, e))?;
        }
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("book");
    let tmp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    fs::write(&tmp_path, content).map_err(|e| RoloError::io(location, e))?;
    fs::rename(&tmp_path, path).map_err(|e| RoloError::io(location, e))?;
    Ok(())
}

/// Read `location` to a string, mapping a missing file to `None`.
pub(crate) fn read_if_exists(location: &str) -> Result<Option<String>> {
    match fs::read_to_string(location) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RoloError::io(location, e)),
    }
}

/// Whether `location` has the given file extension, case-insensitively.
pub(crate) fn has_extension(location: &str, extension: &str) -> bool {
    Path::new(location)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
