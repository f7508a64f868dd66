//! Engine facade errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, EmergenceErrorCode};
use super::{ConfigError, DiscoveryError, StorageError};

/// Errors surfaced by the engine facade and the service boundary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Checkpoint load failed: {0}")]
    CheckpointLoad(#[source] StorageError),

    #[error("Checkpoint save failed: {0}")]
    CheckpointSave(#[source] StorageError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Out-of-order item: expected index {expected}, got {got}")]
    OutOfOrderItem { expected: u64, got: u64 },

    #[error("Nothing to checkpoint: no items processed yet")]
    NothingToCheckpoint,

    #[error("Engine lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl EmergenceErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Discovery(e) => e.error_code(),
            Self::CheckpointLoad(_) => error_code::CHECKPOINT_LOAD_FAILED,
            Self::CheckpointSave(StorageError::Timeout { .. }) => error_code::CHECKPOINT_TIMEOUT,
            Self::CheckpointSave(_) => error_code::CHECKPOINT_SAVE_FAILED,
            Self::Storage(e) => e.error_code(),
            Self::OutOfOrderItem { .. } => error_code::OUT_OF_ORDER_ITEM,
            Self::NothingToCheckpoint => error_code::NOTHING_TO_CHECKPOINT,
            Self::LockPoisoned(_) => error_code::LOCK_POISONED,
            Self::InvalidRequest(_) => error_code::INVALID_REQUEST,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
