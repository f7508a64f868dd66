//! Default statistical discoverer.

use emergence_core::config::DiscoveryConfig;
use emergence_core::errors::DiscoveryResult;
use emergence_core::models::{
    AccumulationState, Correlation, FeatureBundle, MetaPattern, Pattern, UnknownSignal,
};
use emergence_core::traits::IDiscoverer;

use crate::{correlations, meta, patterns, unknown};

/// Deterministic discovery over real signal statistics.
#[derive(Debug, Clone, Default)]
pub struct StatisticalDiscoverer {
    config: DiscoveryConfig,
}

impl StatisticalDiscoverer {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }
}

impl IDiscoverer for StatisticalDiscoverer {
    fn name(&self) -> &str {
        "statistical"
    }

    fn patterns(
        &self,
        bundle: &FeatureBundle,
        _state: &AccumulationState,
    ) -> DiscoveryResult<Vec<Pattern>> {
        let mut found =
            patterns::signal_patterns(bundle, self.config.effective_min_pattern_strength());

        let scanned = correlations::scan_pairs(bundle, self.config.effective_max_lag())?;
        if let Some(cross) =
            patterns::cross_modal_pattern(&scanned, self.config.effective_cross_modal_threshold())
        {
            found.push(cross);
        }
        Ok(found)
    }

    fn correlations(
        &self,
        bundle: &FeatureBundle,
        _state: &AccumulationState,
    ) -> DiscoveryResult<Vec<Correlation>> {
        correlations::discover_correlations(
            bundle,
            self.config.effective_max_lag(),
            self.config.effective_min_correlation(),
            self.config.effective_max_correlations(),
        )
    }

    fn meta_patterns(
        &self,
        _bundle: &FeatureBundle,
        state: &AccumulationState,
        item_index: u64,
    ) -> DiscoveryResult<Vec<MetaPattern>> {
        Ok(meta::strength_trajectories(
            state,
            self.config.effective_meta_min_slope(),
            item_index,
        ))
    }

    fn unknown(
        &self,
        bundle: &FeatureBundle,
        _state: &AccumulationState,
    ) -> DiscoveryResult<Vec<UnknownSignal>> {
        Ok(unknown::explore_unknown(
            bundle,
            self.config.effective_unknown_variance_multiple(),
        ))
    }
}
