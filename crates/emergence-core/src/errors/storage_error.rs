//! Checkpoint storage errors.

use std::path::PathBuf;

use super::error_code::{self, EmergenceErrorCode};

/// Errors that can occur while saving, enumerating, or loading checkpoints.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization failed for {path}: {message}")]
    Serialization { path: PathBuf, message: String },

    #[error("Checkpoint corrupt at {path}: {details}")]
    Corrupt { path: PathBuf, details: String },

    #[error("Checkpoint for item {item_index} already exists")]
    CheckpointExists { item_index: u64 },

    #[error("No checkpoint for item {item_index}")]
    NotFound { item_index: u64 },

    #[error("Checkpoint for item {item_index} timed out after {timeout_ms}ms")]
    Timeout { item_index: u64, timeout_ms: u64 },
}

impl StorageError {
    /// Wrap an IO error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl EmergenceErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Corrupt { .. } => error_code::CHECKPOINT_CORRUPT,
            Self::CheckpointExists { .. } => error_code::CHECKPOINT_EXISTS,
            Self::NotFound { .. } => error_code::CHECKPOINT_NOT_FOUND,
            Self::Timeout { .. } => error_code::CHECKPOINT_TIMEOUT,
            _ => error_code::STORAGE_ERROR,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
