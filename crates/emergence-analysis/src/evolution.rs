//! Evolution views: the summary written with each checkpoint and the full
//! timeline served to monitors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use emergence_core::models::{AccumulationState, DiscoveryLogEntry, PatternKey, StrengthSample};

use crate::emergence::{detect_emergence, EmergenceEvent};

/// Compact evolution summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSummary {
    pub total_items: u64,
    pub patterns_discovered: u64,
    pub correlations_found: u64,
    pub emergence_events: Vec<EmergenceEvent>,
}

/// Full evolution view for external monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEvolution {
    pub timeline: Vec<DiscoveryLogEntry>,
    pub strength_history: BTreeMap<PatternKey, Vec<StrengthSample>>,
    pub emergence_events: Vec<EmergenceEvent>,
}

pub fn evolution_summary(state: &AccumulationState, emergence_threshold: f64) -> EvolutionSummary {
    EvolutionSummary {
        total_items: state.items_processed(),
        patterns_discovered: state.total_patterns(),
        correlations_found: state.total_correlations(),
        emergence_events: detect_emergence(state, emergence_threshold),
    }
}

pub fn pattern_evolution(state: &AccumulationState, emergence_threshold: f64) -> PatternEvolution {
    PatternEvolution {
        timeline: state.discoveries_log().to_vec(),
        strength_history: state.pattern_strengths().clone(),
        emergence_events: detect_emergence(state, emergence_threshold),
    }
}
