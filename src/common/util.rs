use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::common::error::{TagError, Result};

/// Read a whole file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| TagError::from_io(e, path))
}

/// Replace the contents of `path` with `data`.
///
/// The bytes go to a temporary file in the same directory, which is then
/// renamed over the original. A crash mid-write leaves the original intact.
/// Symlinks are followed: the file they point to is replaced, not the link.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let target = match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(TagError::from_io(e, path)),
    };
    let path = target.as_path();

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    // Carry the original permissions over to the replacement.
    if let Ok(meta) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(path).map_err(|e| TagError::Io(e.error))?;
    Ok(())
}
