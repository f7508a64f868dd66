//! Checkpoint descriptors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where and when a checkpoint was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointInfo {
    pub item_index: u64,
    /// Store-specific address of the snapshot (a file path for the file store).
    pub location: String,
    pub saved_at: DateTime<Utc>,
}
