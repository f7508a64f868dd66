//! Ranking, emergence, and evolution behaviour over hand-built histories.

use chrono::Utc;

use emergence_analysis::{
    detect_emergence, evolution_summary, pattern_evolution, top_patterns,
};
use emergence_core::models::{AccumulationState, Discovery, Pattern, PatternKey};

fn pattern(desc: &str, strength: f64) -> Pattern {
    Pattern {
        pattern_type: "trend".to_string(),
        description: desc.to_string(),
        strength,
        confidence: 0.5,
        occurrences: None,
    }
}

/// Feed one discovery per item; each inner slice is that item's patterns.
fn state_from(items: &[&[(&str, f64)]]) -> AccumulationState {
    let mut state = AccumulationState::new(Utc::now());
    for (i, patterns) in items.iter().enumerate() {
        let mut discovery = Discovery::new(i as u64);
        discovery.patterns = patterns.iter().map(|(d, s)| pattern(d, *s)).collect();
        state.absorb(&discovery, Utc::now());
    }
    state
}

fn key(desc: &str) -> PatternKey {
    PatternKey::derive("trend", desc)
}

#[test]
fn top_patterns_ranks_by_mean_strength() {
    // A: [0.9], B: [0.5, 0.7], C: [0.95, 0.95]
    let state = state_from(&[
        &[("a", 0.9), ("b", 0.5), ("c", 0.95)],
        &[("b", 0.7), ("c", 0.95)],
    ]);

    let top = top_patterns(&state, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].pattern, key("c"));
    assert_eq!(top[1].pattern, key("a"));
    assert!((top[0].average_strength - 0.95).abs() < 1e-12);
    assert_eq!(top[0].occurrences, 2);
    assert_eq!(top[0].first_seen, 0);
    assert_eq!(top[0].last_seen, 1);
}

#[test]
fn top_patterns_limit_larger_than_population() {
    let state = state_from(&[&[("a", 0.3)]]);
    assert_eq!(top_patterns(&state, 10).len(), 1);
    assert!(top_patterns(&state, 0).is_empty());
}

#[test]
fn top_patterns_on_empty_state_is_empty() {
    let state = AccumulationState::new(Utc::now());
    assert!(top_patterns(&state, 5).is_empty());
}

#[test]
fn emergence_uses_first_strength_only() {
    // "late" becomes strong only later: not an emergence.
    let state = state_from(&[
        &[("late", 0.2)],
        &[("late", 0.95), ("sudden", 0.85)],
        &[("sudden", 0.1)],
    ]);

    let events = detect_emergence(&state, 0.8);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pattern, key("sudden"));
    assert_eq!(events[0].item_index, 1);
    assert!((events[0].initial_strength - 0.85).abs() < 1e-12);
}

#[test]
fn emergence_threshold_is_strict() {
    let state = state_from(&[&[("edge", 0.8)]]);
    assert!(detect_emergence(&state, 0.8).is_empty());
}

#[test]
fn evolution_views_mirror_state() {
    let state = state_from(&[&[("a", 0.9)], &[], &[("a", 0.4)]]);

    let summary = evolution_summary(&state, 0.8);
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.patterns_discovered, 2);
    assert_eq!(summary.correlations_found, 0);
    assert_eq!(summary.emergence_events.len(), 1);

    let evolution = pattern_evolution(&state, 0.8);
    assert_eq!(evolution.timeline.len(), 3);
    assert_eq!(evolution.strength_history[&key("a")].len(), 2);
    assert_eq!(evolution.emergence_events, summary.emergence_events);
}
