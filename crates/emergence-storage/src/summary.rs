//! Human-readable companion summary written beside each snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use emergence_analysis::{evolution_summary, top_patterns, EvolutionSummary, RankedPattern};
use emergence_core::config::AnalysisConfig;
use emergence_core::constants::VERSION;
use emergence_core::models::AccumulationState;

/// Derived view of a checkpoint. Never read back into state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSummary {
    pub item_index: u64,
    pub items_processed: u64,
    pub total_patterns: u64,
    pub total_correlations: u64,
    pub total_unknown: u64,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub top_patterns: Vec<RankedPattern>,
    pub evolution: EvolutionSummary,
}

impl CheckpointSummary {
    pub fn build(state: &AccumulationState, item_index: u64, analysis: &AnalysisConfig) -> Self {
        Self {
            item_index,
            items_processed: state.items_processed(),
            total_patterns: state.total_patterns(),
            total_correlations: state.total_correlations(),
            total_unknown: state.total_unknown(),
            generated_at: Utc::now(),
            engine_version: VERSION.to_string(),
            top_patterns: top_patterns(state, analysis.effective_top_patterns_limit()),
            evolution: evolution_summary(state, analysis.effective_emergence_threshold()),
        }
    }
}
