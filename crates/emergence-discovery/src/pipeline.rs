//! DiscoveryPipeline: drives an `IDiscoverer` for one item.
//!
//! Gating: patterns and correlations need at least one prior item,
//! meta-patterns need more than ten, unknown-space exploration always runs.
//! A failing sub-analysis is logged and contributes nothing. Records with
//! non-finite values are dropped; scores are clamped into range.

use emergence_core::config::AnalysisConfig;
use emergence_core::constants::{META_PATTERN_MIN_ITEMS, MIN_ITEMS_FOR_PATTERNS};
use emergence_core::errors::DiscoveryResult;
use emergence_core::models::{
    AccumulationState, Correlation, Discovery, FeatureBundle, Pattern, UnknownSignal,
};
use emergence_core::traits::IDiscoverer;
use tracing::{debug, info, warn};

pub struct DiscoveryPipeline {
    discoverer: Box<dyn IDiscoverer>,
    strong_pattern_threshold: f64,
}

impl DiscoveryPipeline {
    pub fn new(discoverer: Box<dyn IDiscoverer>, analysis: &AnalysisConfig) -> Self {
        Self {
            discoverer,
            strong_pattern_threshold: analysis.effective_strong_pattern_threshold(),
        }
    }

    pub fn discoverer_name(&self) -> &str {
        self.discoverer.name()
    }

    /// Run every eligible sub-analysis against the pre-merge `state`.
    /// Never fails.
    pub fn run(&self, bundle: &FeatureBundle, state: &AccumulationState, item_index: u64) -> Discovery {
        let depth = state.items_processed();
        let mut discovery = Discovery::new(item_index);

        if depth >= MIN_ITEMS_FOR_PATTERNS {
            discovery.patterns = contain("patterns", self.discoverer.patterns(bundle, state))
                .into_iter()
                .filter_map(sanitize_pattern)
                .collect();
            discovery.correlations =
                contain("correlations", self.discoverer.correlations(bundle, state))
                    .into_iter()
                    .filter_map(sanitize_correlation)
                    .collect();
        }

        if depth > META_PATTERN_MIN_ITEMS {
            discovery.meta_patterns = contain(
                "meta_patterns",
                self.discoverer.meta_patterns(bundle, state, item_index),
            )
            .into_iter()
            .filter(|m| m.acceleration.is_finite())
            .collect();
        }

        discovery.unknown = contain("unknown", self.discoverer.unknown(bundle, state))
            .into_iter()
            .filter_map(sanitize_unknown)
            .collect();

        for pattern in &discovery.patterns {
            if pattern.strength > self.strong_pattern_threshold {
                info!(
                    item_index,
                    pattern = %pattern.key(),
                    strength = pattern.strength,
                    "strong pattern discovered"
                );
            }
        }

        debug!(
            item_index,
            discoverer = self.discoverer.name(),
            patterns = discovery.patterns.len(),
            correlations = discovery.correlations.len(),
            meta_patterns = discovery.meta_patterns.len(),
            unknown = discovery.unknown.len(),
            "discovery complete"
        );

        discovery
    }
}

fn contain<T>(analysis: &'static str, result: DiscoveryResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(found) => found,
        Err(e) => {
            warn!(analysis, error = %e, "discovery sub-analysis failed, using empty result");
            Vec::new()
        }
    }
}

fn sanitize_pattern(mut pattern: Pattern) -> Option<Pattern> {
    if !pattern.strength.is_finite() || !pattern.confidence.is_finite() {
        return None;
    }
    pattern.strength = pattern.strength.clamp(0.0, 1.0);
    pattern.confidence = pattern.confidence.clamp(0.0, 1.0);
    Some(pattern)
}

fn sanitize_correlation(mut correlation: Correlation) -> Option<Correlation> {
    if !correlation.correlation.is_finite() || !correlation.significance.is_finite() {
        return None;
    }
    correlation.correlation = correlation.correlation.clamp(-1.0, 1.0);
    correlation.significance = correlation.significance.clamp(0.0, 1.0);
    Some(correlation)
}

fn sanitize_unknown(signal: UnknownSignal) -> Option<UnknownSignal> {
    let finite = [signal.deviation, signal.baseline, signal.kurtosis]
        .iter()
        .all(|v| v.is_finite());
    finite.then_some(signal)
}
