use crate::errors::StorageResult;
use crate::models::{AccumulationState, CheckpointInfo};

/// Durable, write-once snapshots of the accumulated state keyed by item index.
pub trait ICheckpointStore: Send + Sync {
    /// Persist `state` as the checkpoint for `item_index`, plus its
    /// human-readable summary. Fails with `CheckpointExists` rather than
    /// overwrite an earlier snapshot at the same index.
    fn save(&self, state: &AccumulationState, item_index: u64) -> StorageResult<CheckpointInfo>;

    /// The checkpoint with the greatest item index, if any.
    /// A corrupt or unreadable latest snapshot is an error, never `None`.
    fn load_latest(&self) -> StorageResult<Option<(CheckpointInfo, AccumulationState)>>;

    /// Load a specific checkpoint.
    fn load(&self, item_index: u64) -> StorageResult<AccumulationState>;

    /// All checkpoints, ascending by item index.
    fn list(&self) -> StorageResult<Vec<CheckpointInfo>>;

    /// Whether a snapshot exists for `item_index`.
    fn contains(&self, item_index: u64) -> StorageResult<bool>;
}
