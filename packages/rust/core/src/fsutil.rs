//! Filesystem helpers shared by the assembler and the API copier.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use docsplice_shared::{DocspliceError, Result};

/// Remove `dir` and everything under it. A missing directory is fine.
pub(crate) fn remove_tree(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {
            debug!(path = %dir.display(), "removed previous output");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DocspliceError::io(dir, e)),
    }
}

/// Create the parent directory of `path` if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DocspliceError::io(parent, e))?;
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, contents).map_err(|e| DocspliceError::io(path, e))
}

/// Copy a single file byte-for-byte, creating parent directories.
pub(crate) fn copy_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent(to)?;
    std::fs::copy(from, to).map_err(|e| DocspliceError::io(from, e))?;
    Ok(())
}

/// Recursively copy the directory `from` to `to`. Returns the number of
/// files copied.
pub(crate) fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry.map_err(|e| DocspliceError::walk(from, e))?;
        let dest = mirror_path(from, entry.path(), to)?;

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| DocspliceError::io(&dest, e))?;
        } else {
            copy_file(entry.path(), &dest)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Map `path` (under `src_root`) onto the same relative location under `dest_root`.
pub(crate) fn mirror_path(src_root: &Path, path: &Path, dest_root: &Path) -> Result<PathBuf> {
    let rel = path.strip_prefix(src_root).map_err(|_| {
        DocspliceError::config(format!(
            "{} is not under {}",
            path.display(),
            src_root.display()
        ))
    })?;
    Ok(dest_root.join(rel))
}
