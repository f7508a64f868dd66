//! # emergence-discovery
//!
//! Discovery functions over one feature bundle plus the accumulated state.
//!
//! [`StatisticalDiscoverer`] is the default [`IDiscoverer`](emergence_core::IDiscoverer):
//! per-signal periodicity/trend/burst patterns, lagged cross-modality
//! correlations, strength-trajectory meta-patterns, and variance-based
//! unknown-space flags. [`DiscoveryPipeline`] drives any implementation and
//! enforces the shared contract: history gating, error containment, and
//! range sanitisation.

pub mod correlations;
pub mod discoverer;
pub mod meta;
pub mod patterns;
pub mod pipeline;
pub mod stats;
pub mod unknown;

pub use discoverer::StatisticalDiscoverer;
pub use pipeline::DiscoveryPipeline;
