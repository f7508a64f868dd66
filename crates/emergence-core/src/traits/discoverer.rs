use crate::errors::DiscoveryResult;
use crate::models::{
    AccumulationState, Correlation, FeatureBundle, MetaPattern, Pattern, UnknownSignal,
};

/// Pluggable discovery functions.
///
/// Each method reads the bundle and the current state and never mutates
/// either. Gating by history depth, error containment, and range
/// sanitisation are applied by the pipeline that drives the implementation,
/// so implementations only have to produce candidates.
pub trait IDiscoverer: Send + Sync {
    /// Human-readable implementation name for logs.
    fn name(&self) -> &str;

    /// Candidate patterns in this bundle.
    fn patterns(
        &self,
        bundle: &FeatureBundle,
        state: &AccumulationState,
    ) -> DiscoveryResult<Vec<Pattern>>;

    /// Pairwise, time-lagged signal correlations.
    fn correlations(
        &self,
        bundle: &FeatureBundle,
        state: &AccumulationState,
    ) -> DiscoveryResult<Vec<Correlation>>;

    /// Second-order trends in the accumulated history.
    fn meta_patterns(
        &self,
        bundle: &FeatureBundle,
        state: &AccumulationState,
        item_index: u64,
    ) -> DiscoveryResult<Vec<MetaPattern>>;

    /// Statistically unusual signals left unclassified.
    fn unknown(
        &self,
        bundle: &FeatureBundle,
        state: &AccumulationState,
    ) -> DiscoveryResult<Vec<UnknownSignal>>;
}
