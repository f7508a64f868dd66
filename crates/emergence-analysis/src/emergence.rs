//! Emergence events: patterns whose first recorded strength exceeds a threshold.

use serde::{Deserialize, Serialize};

use emergence_core::models::{AccumulationState, PatternKey};

/// A pattern that was strong from the moment it first appeared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergenceEvent {
    /// Index of the pattern's first recorded strength, not of the analysis.
    pub item_index: u64,
    pub pattern: PatternKey,
    pub initial_strength: f64,
}

/// Every emergence event in `state`, ordered by item index then key.
///
/// Strictly greater than `threshold`: a first strength equal to the threshold
/// is not an emergence.
pub fn detect_emergence(state: &AccumulationState, threshold: f64) -> Vec<EmergenceEvent> {
    let mut events: Vec<EmergenceEvent> = state
        .pattern_strengths()
        .iter()
        .filter_map(|(key, history)| {
            let first = history.first()?;
            (first.strength > threshold).then(|| EmergenceEvent {
                item_index: first.item_index,
                pattern: key.clone(),
                initial_strength: first.strength,
            })
        })
        .collect();

    events.sort_by(|a, b| {
        a.item_index
            .cmp(&b.item_index)
            .then_with(|| a.pattern.cmp(&b.pattern))
    });
    events
}
