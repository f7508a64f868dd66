//! Property tests for ranking: ordering, bounds, and limit handling.

use chrono::Utc;
use proptest::prelude::*;

use emergence_analysis::top_patterns;
use emergence_core::models::{AccumulationState, Discovery, Pattern};

fn build_state(items: &[Vec<(u8, f64)>]) -> AccumulationState {
    let mut state = AccumulationState::new(Utc::now());
    for (i, patterns) in items.iter().enumerate() {
        let mut discovery = Discovery::new(i as u64);
        discovery.patterns = patterns
            .iter()
            .map(|(id, strength)| Pattern {
                pattern_type: "periodic".to_string(),
                description: format!("signal {id}"),
                strength: *strength,
                confidence: 0.5,
                occurrences: None,
            })
            .collect();
        state.absorb(&discovery, Utc::now());
    }
    state
}

fn items_strategy() -> impl Strategy<Value = Vec<Vec<(u8, f64)>>> {
    prop::collection::vec(prop::collection::vec((0u8..12, 0.0f64..=1.0), 0..6), 0..20)
}

proptest! {
    #[test]
    fn ranking_is_sorted_descending(items in items_strategy(), limit in 0usize..15) {
        let state = build_state(&items);
        let top = top_patterns(&state, limit);
        for pair in top.windows(2) {
            prop_assert!(pair[0].average_strength >= pair[1].average_strength);
        }
    }

    #[test]
    fn ranking_respects_limit(items in items_strategy(), limit in 0usize..15) {
        let state = build_state(&items);
        let top = top_patterns(&state, limit);
        prop_assert_eq!(top.len(), limit.min(state.pattern_strengths().len()));
    }

    #[test]
    fn averages_stay_in_unit_range(items in items_strategy()) {
        let state = build_state(&items);
        for ranked in top_patterns(&state, usize::MAX) {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&ranked.average_strength));
            prop_assert!(ranked.first_seen <= ranked.last_seen);
        }
    }
}
