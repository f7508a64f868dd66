//! AccumulationState: the single durable aggregate.
//!
//! Fields are private: the only write path is [`AccumulationState::absorb`],
//! which keeps `items_processed == discoveries_log.len()` and appends every
//! history in processing order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::discovery::{Discovery, MetaPattern};
use super::keys::{FeaturePairKey, PatternKey};

/// One recorded strength of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthSample {
    pub item_index: u64,
    pub strength: f64,
}

/// One recorded correlation value of a feature pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSample {
    pub item_index: u64,
    pub value: f64,
}

/// Chronological summary row, one per processed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryLogEntry {
    pub item_index: u64,
    pub timestamp: DateTime<Utc>,
    pub pattern_count: usize,
    pub correlation_count: usize,
    pub unknown_count: usize,
    #[serde(default)]
    pub meta_pattern_count: usize,
}

/// Accumulated cross-item knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulationState {
    items_processed: u64,
    total_patterns: u64,
    total_correlations: u64,
    total_unknown: u64,
    pattern_strengths: BTreeMap<PatternKey, Vec<StrengthSample>>,
    correlation_history: BTreeMap<FeaturePairKey, Vec<CorrelationSample>>,
    discoveries_log: Vec<DiscoveryLogEntry>,
    meta_patterns: Vec<MetaPattern>,
    creation_time: DateTime<Utc>,
}

impl AccumulationState {
    /// A cold-start state.
    pub fn new(creation_time: DateTime<Utc>) -> Self {
        Self {
            items_processed: 0,
            total_patterns: 0,
            total_correlations: 0,
            total_unknown: 0,
            pattern_strengths: BTreeMap::new(),
            correlation_history: BTreeMap::new(),
            discoveries_log: Vec::new(),
            meta_patterns: Vec::new(),
            creation_time,
        }
    }

    /// Merge one item's discoveries. Infallible, so the merge is all-or-nothing.
    ///
    /// The caller guarantees `discovery.item_index` is the next index in
    /// processing order.
    pub fn absorb(&mut self, discovery: &Discovery, timestamp: DateTime<Utc>) -> &DiscoveryLogEntry {
        let item_index = discovery.item_index;

        self.items_processed += 1;
        self.total_patterns += discovery.patterns.len() as u64;
        self.total_correlations += discovery.correlations.len() as u64;
        self.total_unknown += discovery.unknown.len() as u64;

        for pattern in &discovery.patterns {
            self.pattern_strengths
                .entry(pattern.key())
                .or_default()
                .push(StrengthSample {
                    item_index,
                    strength: pattern.strength,
                });
        }

        for correlation in &discovery.correlations {
            self.correlation_history
                .entry(correlation.key())
                .or_default()
                .push(CorrelationSample {
                    item_index,
                    value: correlation.correlation,
                });
        }

        self.meta_patterns
            .extend(discovery.meta_patterns.iter().cloned());

        self.discoveries_log.push(DiscoveryLogEntry {
            item_index,
            timestamp,
            pattern_count: discovery.patterns.len(),
            correlation_count: discovery.correlations.len(),
            unknown_count: discovery.unknown.len(),
            meta_pattern_count: discovery.meta_patterns.len(),
        });

        &self.discoveries_log[self.discoveries_log.len() - 1]
    }

    /// The index the next processed item must carry.
    pub fn next_item_index(&self) -> u64 {
        self.items_processed
    }

    pub fn items_processed(&self) -> u64 {
        self.items_processed
    }

    pub fn total_patterns(&self) -> u64 {
        self.total_patterns
    }

    pub fn total_correlations(&self) -> u64 {
        self.total_correlations
    }

    pub fn total_unknown(&self) -> u64 {
        self.total_unknown
    }

    pub fn pattern_strengths(&self) -> &BTreeMap<PatternKey, Vec<StrengthSample>> {
        &self.pattern_strengths
    }

    pub fn correlation_history(&self) -> &BTreeMap<FeaturePairKey, Vec<CorrelationSample>> {
        &self.correlation_history
    }

    pub fn discoveries_log(&self) -> &[DiscoveryLogEntry] {
        &self.discoveries_log
    }

    pub fn meta_patterns(&self) -> &[MetaPattern] {
        &self.meta_patterns
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// The last `limit` log entries, oldest of the window first.
    pub fn recent_discoveries(&self, limit: usize) -> &[DiscoveryLogEntry] {
        let start = self.discoveries_log.len().saturating_sub(limit);
        &self.discoveries_log[start..]
    }

    /// Check the structural invariants. Used after deserializing a checkpoint.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.items_processed != self.discoveries_log.len() as u64 {
            return Err(format!(
                "items_processed {} != discoveries_log length {}",
                self.items_processed,
                self.discoveries_log.len()
            ));
        }

        if self
            .discoveries_log
            .windows(2)
            .any(|w| w[0].item_index > w[1].item_index)
        {
            return Err("discoveries_log is not in item order".to_string());
        }

        for (key, history) in &self.pattern_strengths {
            if history.windows(2).any(|w| w[0].item_index > w[1].item_index) {
                return Err(format!("pattern history {key} is not in item order"));
            }
        }

        for (key, history) in &self.correlation_history {
            if history.windows(2).any(|w| w[0].item_index > w[1].item_index) {
                return Err(format!("correlation history {key} is not in item order"));
            }
        }

        Ok(())
    }
}
