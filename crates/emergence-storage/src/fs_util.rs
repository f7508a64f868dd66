//! Atomic file writes through a temp file in the target directory.

use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use emergence_core::errors::{StorageError, StorageResult};

/// How an existing file at the target path is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail with `AlreadyExists` rather than replace.
    CreateNew,
    /// Atomically replace.
    Replace,
}

/// Write `bytes` to `path` via a synced temp file in the same directory.
/// Readers never observe a partially written file.
pub fn write_atomic(path: &Path, bytes: &[u8], mode: WriteMode) -> StorageResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| StorageError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| StorageError::io(tmp.path(), e))?;

    let persisted = match mode {
        WriteMode::CreateNew => tmp.persist_noclobber(path),
        WriteMode::Replace => tmp.persist(path),
    };
    persisted.map(|_| ()).map_err(|e| StorageError::io(path, e.error))
}

/// Whether an IO error means the target already existed.
pub fn is_already_exists(err: &StorageError) -> bool {
    matches!(err, StorageError::Io { source, .. } if source.kind() == ErrorKind::AlreadyExists)
}
