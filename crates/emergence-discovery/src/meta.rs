//! Second-order patterns: trajectories of recorded pattern strengths.

use emergence_analysis::momentum::{classify_trajectory, strength_slope};
use emergence_core::models::{AccumulationState, MetaPattern, Trajectory};

pub const PATTERN_EVOLUTION: &str = "pattern_evolution";

/// One meta-pattern per pattern key whose strength history is rising or
/// falling faster than `min_slope` per observation.
pub fn strength_trajectories(
    state: &AccumulationState,
    min_slope: f64,
    item_index: u64,
) -> Vec<MetaPattern> {
    state
        .pattern_strengths()
        .iter()
        .filter_map(|(key, history)| {
            let slope = strength_slope(history)?;
            let trajectory = classify_trajectory(slope, min_slope);
            let word = match trajectory {
                Trajectory::Ascending => "ascending",
                Trajectory::Descending => "descending",
                Trajectory::Stable => return None,
            };
            Some(MetaPattern {
                pattern_type: PATTERN_EVOLUTION.to_string(),
                description: format!("{key} {word}"),
                subject: key.clone(),
                trajectory,
                acceleration: slope,
                item_index,
            })
        })
        .collect()
}
