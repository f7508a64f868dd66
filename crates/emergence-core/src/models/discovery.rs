//! Per-call discovery records.
//!
//! A `Discovery` is produced by the discovery functions, merged into the
//! accumulated state, and then discarded.

use serde::{Deserialize, Serialize};

use super::keys::{FeaturePairKey, PatternKey};

/// A named, recurring structural regularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub description: String,
    /// In [0.0, 1.0].
    pub strength: f64,
    /// In [0.0, 1.0].
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
}

impl Pattern {
    pub fn key(&self) -> PatternKey {
        PatternKey::derive(&self.pattern_type, &self.description)
    }
}

/// A signed, time-lagged relationship between two signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub feature_a: String,
    pub feature_b: String,
    /// In [-1.0, 1.0].
    pub correlation: f64,
    /// In [0.0, 1.0].
    pub significance: f64,
    /// Offset of `feature_b` relative to `feature_a`, in samples.
    pub lag: i32,
}

impl Correlation {
    pub fn key(&self) -> FeaturePairKey {
        FeaturePairKey::derive(&self.feature_a, &self.feature_b)
    }
}

/// Direction of a pattern's strength over its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Ascending,
    Descending,
    Stable,
}

/// A pattern about patterns: a second-order trend in the accumulated history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaPattern {
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub description: String,
    /// The pattern whose history this describes.
    pub subject: PatternKey,
    pub trajectory: Trajectory,
    /// Least-squares slope of the subject's strengths per observation.
    pub acceleration: f64,
    /// Item at which this meta-pattern was observed.
    pub item_index: u64,
}

/// How promising an unclassified signal looks for later promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencePotential {
    Low,
    Medium,
    High,
}

/// A statistically unusual signal deliberately left unclassified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownSignal {
    pub feature: String,
    /// Standard deviation of the signal.
    pub deviation: f64,
    /// The bundle baseline it was compared against.
    pub baseline: f64,
    /// Excess kurtosis of the signal.
    pub kurtosis: f64,
    pub emergence_potential: EmergencePotential,
    pub requires_investigation: bool,
}

/// Everything discovered in one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    pub item_index: u64,
    pub patterns: Vec<Pattern>,
    pub correlations: Vec<Correlation>,
    pub meta_patterns: Vec<MetaPattern>,
    pub unknown: Vec<UnknownSignal>,
}

impl Discovery {
    pub fn new(item_index: u64) -> Self {
        Self {
            item_index,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
            && self.correlations.is_empty()
            && self.meta_patterns.is_empty()
            && self.unknown.is_empty()
    }
}
