//! # emergence-analysis
//!
//! Read-only analysis over accumulated state:
//! top-N ranking by mean strength, emergence-event detection, evolution
//! summaries, and trend (momentum) estimation over strength histories.
//!
//! Everything here is a full recomputation over history.

pub mod emergence;
pub mod evolution;
pub mod momentum;
pub mod ranking;

pub use emergence::{detect_emergence, EmergenceEvent};
pub use evolution::{evolution_summary, pattern_evolution, EvolutionSummary, PatternEvolution};
pub use momentum::{classify_trajectory, strength_slope};
pub use ranking::{top_patterns, RankedPattern};
