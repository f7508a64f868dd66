//! Ranking and emergence configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Configuration for ranking, emergence detection, and query defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// First-strength threshold for an emergence event. Default: 0.8.
    pub emergence_threshold: Option<f64>,
    /// Patterns above this strength are logged as they are discovered. Default: 0.7.
    pub strong_pattern_threshold: Option<f64>,
    /// Patterns listed in checkpoint summaries. Default: 10.
    pub top_patterns_limit: Option<usize>,
    /// Default window for recent-discovery queries. Default: 10.
    pub recent_discoveries_limit: Option<usize>,
}

impl AnalysisConfig {
    pub fn effective_emergence_threshold(&self) -> f64 {
        self.emergence_threshold
            .unwrap_or(defaults::DEFAULT_EMERGENCE_THRESHOLD)
    }

    pub fn effective_strong_pattern_threshold(&self) -> f64 {
        self.strong_pattern_threshold
            .unwrap_or(defaults::DEFAULT_STRONG_PATTERN_THRESHOLD)
    }

    pub fn effective_top_patterns_limit(&self) -> usize {
        self.top_patterns_limit
            .unwrap_or(defaults::DEFAULT_TOP_PATTERNS_LIMIT)
    }

    pub fn effective_recent_discoveries_limit(&self) -> usize {
        self.recent_discoveries_limit
            .unwrap_or(defaults::DEFAULT_RECENT_DISCOVERIES_LIMIT)
    }
}
