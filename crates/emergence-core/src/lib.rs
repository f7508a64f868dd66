//! # emergence-core
//!
//! Foundation crate for the emergence accumulation engine.
//! Defines the feature bundle, discovery records, accumulated state, keys,
//! errors, config, traits, and constants. Every other crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::EmergenceConfig;
pub use errors::{
    ConfigError, DiscoveryError, DiscoveryResult, EmergenceErrorCode, EngineError, EngineResult,
    StorageError, StorageResult,
};
pub use models::{
    AccumulationState, CheckpointInfo, Correlation, Discovery, DiscoveryLogEntry, FeatureBundle,
    FeaturePairKey, MetaPattern, Pattern, PatternKey, StateView, UnknownSignal,
};
pub use traits::{ICheckpointStore, IDiscoverer};
