//! Top-N pattern ranking by mean recorded strength.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use emergence_core::models::{AccumulationState, PatternKey, StrengthSample};

/// One ranked pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPattern {
    pub pattern: PatternKey,
    /// Arithmetic mean of every recorded strength.
    pub average_strength: f64,
    pub occurrences: usize,
    pub first_seen: u64,
    pub last_seen: u64,
}

impl RankedPattern {
    /// Rank one history. `None` for an empty history.
    pub fn from_history(key: &PatternKey, history: &[StrengthSample]) -> Option<Self> {
        let first = history.first()?;
        let last = history.last()?;
        let sum: f64 = history.iter().map(|s| s.strength).sum();
        Some(Self {
            pattern: key.clone(),
            average_strength: sum / history.len() as f64,
            occurrences: history.len(),
            first_seen: first.item_index,
            last_seen: last.item_index,
        })
    }
}

/// Deterministic ranking order: mean strength descending, then occurrence
/// count descending, then key ascending.
pub fn ranking_order(a: &RankedPattern, b: &RankedPattern) -> Ordering {
    b.average_strength
        .total_cmp(&a.average_strength)
        .then_with(|| b.occurrences.cmp(&a.occurrences))
        .then_with(|| a.pattern.cmp(&b.pattern))
}

/// The `limit` strongest patterns recorded so far.
pub fn top_patterns(state: &AccumulationState, limit: usize) -> Vec<RankedPattern> {
    let mut ranked: Vec<RankedPattern> = state
        .pattern_strengths()
        .iter()
        .filter_map(|(key, history)| RankedPattern::from_history(key, history))
        .collect();

    ranked.sort_by(ranking_order);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(key: &str, avg: f64, occurrences: usize) -> RankedPattern {
        RankedPattern {
            pattern: PatternKey::derive("t", key),
            average_strength: avg,
            occurrences,
            first_seen: 0,
            last_seen: 0,
        }
    }

    #[test]
    fn ties_break_on_occurrences_then_key() {
        let mut items = vec![
            ranked("b", 0.5, 1),
            ranked("a", 0.5, 1),
            ranked("c", 0.5, 3),
        ];
        items.sort_by(ranking_order);
        let keys: Vec<&str> = items.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(keys, vec!["t:c", "t:a", "t:b"]);
    }

    #[test]
    fn empty_history_is_not_ranked() {
        assert!(RankedPattern::from_history(&PatternKey::derive("t", "x"), &[]).is_none());
    }
}
