//! Private utility module
use std::path::Path;

/// Check whether the given file path ends with the ".gz" extension.
pub fn is_gz_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}
