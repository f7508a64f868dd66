//! Read-only projection of the accumulated state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::checkpoint::CheckpointInfo;
use super::state::AccumulationState;

/// Derived intelligence metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMetrics {
    /// Count of distinct pattern keys.
    pub pattern_diversity: usize,
    /// Count of distinct feature-pair keys.
    pub correlation_density: usize,
    /// `total_patterns / max(1, items_processed)`.
    pub discovery_rate: f64,
}

/// Point-in-time copy handed to external callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateView {
    pub items_processed: u64,
    pub total_patterns: u64,
    pub total_correlations: u64,
    pub total_unknown: u64,
    /// Share of all discoveries left unclassified, in [0.0, 1.0].
    pub unknown_space_used: f64,
    pub creation_time: DateTime<Utc>,
    pub last_checkpoint: Option<CheckpointInfo>,
    pub metrics: StateMetrics,
}

impl StateView {
    pub fn from_state(state: &AccumulationState, last_checkpoint: Option<CheckpointInfo>) -> Self {
        let classified = state.total_patterns() + state.total_correlations();
        let all = classified + state.total_unknown();
        Self {
            items_processed: state.items_processed(),
            total_patterns: state.total_patterns(),
            total_correlations: state.total_correlations(),
            total_unknown: state.total_unknown(),
            unknown_space_used: state.total_unknown() as f64 / all.max(1) as f64,
            creation_time: state.creation_time(),
            last_checkpoint,
            metrics: StateMetrics {
                pattern_diversity: state.pattern_strengths().len(),
                correlation_density: state.correlation_history().len(),
                discovery_rate: state.total_patterns() as f64
                    / state.items_processed().max(1) as f64,
            },
        }
    }
}
