//! Data model: bundles in, discoveries out, accumulated state in between.

pub mod checkpoint;
pub mod discovery;
pub mod feature_bundle;
pub mod keys;
pub mod state;
pub mod state_view;

pub use checkpoint::CheckpointInfo;
pub use discovery::{
    Correlation, Discovery, EmergencePotential, MetaPattern, Pattern, Trajectory, UnknownSignal,
};
pub use feature_bundle::{FeatureBundle, ModalitySignals, SignalRef};
pub use keys::{FeaturePairKey, PatternKey};
pub use state::{AccumulationState, CorrelationSample, DiscoveryLogEntry, StrengthSample};
pub use state_view::{StateMetrics, StateView};
