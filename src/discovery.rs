//! Source file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{err_msg, ParamTestError};

/// Extension of files the CLI expands when given a directory.
pub const SOURCE_EXTENSION: &str = "swift";

/// Returns `root` itself when it is a file, otherwise every `.swift` file
/// below it.
///
/// The returned list is sorted so output order is deterministic.
pub fn discover_sources<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, ParamTestError> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.exists() {
        return Err(err_msg!(Io, "path '{}' does not exist", root.display()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| err_msg!(Io, "failed to walk directory: {}", e))?;

        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }

        files.push(entry.path().to_path_buf());
    }
    files.sort();
    Ok(files)
}

fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Reads a source file into a string.
pub fn read_source(path: &Path) -> Result<String, ParamTestError> {
    std::fs::read_to_string(path)
        .map_err(|e| err_msg!(Io, "failed to read '{}': {}", path.display(), e))
}
