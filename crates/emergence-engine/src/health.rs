//! Engine health.

use serde::{Deserialize, Serialize};

use emergence_core::models::CheckpointInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    /// Processed items are ahead of the last durable checkpoint.
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub items_processed: u64,
    pub last_checkpoint: Option<CheckpointInfo>,
    /// Items processed since the last durable checkpoint.
    pub checkpoint_lag: u64,
    pub discoverer: String,
    pub version: String,
}

impl HealthReport {
    pub fn new(
        items_processed: u64,
        last_checkpoint: Option<CheckpointInfo>,
        discoverer: &str,
        version: &str,
    ) -> Self {
        let durable = last_checkpoint
            .as_ref()
            .map_or(0, |info| info.item_index + 1);
        let checkpoint_lag = items_processed.saturating_sub(durable);
        Self {
            status: if checkpoint_lag == 0 {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            },
            items_processed,
            last_checkpoint,
            checkpoint_lag,
            discoverer: discoverer.to_string(),
            version: version.to_string(),
        }
    }
}
