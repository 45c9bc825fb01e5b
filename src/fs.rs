//! File output helpers

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::WeaveResult;

/// Write `content` to `path` through a temporary file in the same directory,
/// so readers never observe a half-written page. Parent directories are
/// created as needed.
pub fn write_atomic(path: &Path, content: &str) -> WeaveResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copy a file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> WeaveResult<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)?;
    Ok(())
}
