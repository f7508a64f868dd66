//! Discovery-function configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds for the built-in statistical discovery functions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Minimum strength for a per-signal pattern to be reported. Default: 0.5.
    pub min_pattern_strength: Option<f64>,
    /// Minimum |r| for the strongest correlation to become a cross-modal pattern. Default: 0.7.
    pub cross_modal_threshold: Option<f64>,
    /// Minimum |r| for a correlation to be reported. Default: 0.3.
    pub min_correlation: Option<f64>,
    /// Largest temporal offset searched, in samples. Default: 10.
    pub max_lag: Option<usize>,
    /// Correlations kept per item, strongest first. Default: 25.
    pub max_correlations: Option<usize>,
    /// Minimum |slope| of a strength history to count as a trajectory. Default: 0.02.
    pub meta_min_slope: Option<f64>,
    /// Standard deviation multiple of the bundle baseline that flags a signal. Default: 1.5.
    pub unknown_variance_multiple: Option<f64>,
}

impl DiscoveryConfig {
    pub fn effective_min_pattern_strength(&self) -> f64 {
        self.min_pattern_strength
            .unwrap_or(defaults::DEFAULT_MIN_PATTERN_STRENGTH)
    }

    pub fn effective_cross_modal_threshold(&self) -> f64 {
        self.cross_modal_threshold
            .unwrap_or(defaults::DEFAULT_CROSS_MODAL_THRESHOLD)
    }

    pub fn effective_min_correlation(&self) -> f64 {
        self.min_correlation
            .unwrap_or(defaults::DEFAULT_MIN_CORRELATION)
    }

    pub fn effective_max_lag(&self) -> usize {
        self.max_lag.unwrap_or(defaults::DEFAULT_MAX_LAG)
    }

    pub fn effective_max_correlations(&self) -> usize {
        self.max_correlations
            .unwrap_or(defaults::DEFAULT_MAX_CORRELATIONS)
    }

    pub fn effective_meta_min_slope(&self) -> f64 {
        self.meta_min_slope
            .unwrap_or(defaults::DEFAULT_META_MIN_SLOPE)
    }

    pub fn effective_unknown_variance_multiple(&self) -> f64 {
        self.unknown_variance_multiple
            .unwrap_or(defaults::DEFAULT_UNKNOWN_VARIANCE_MULTIPLE)
    }
}
