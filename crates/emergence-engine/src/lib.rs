//! # emergence-engine
//!
//! The sequential intelligence engine: one feature bundle per item,
//! discovered against the accumulated state, merged, then checkpointed.
//!
//! - [`IntelligenceEngine`]: single-writer facade owning the state.
//! - [`IntelligenceService`]: lock-guarded request/response boundary.
//! - [`EmergenceMonitor`]: polling observer that treats errors as transient.

pub mod engine;
pub mod health;
pub mod monitor;
pub mod service;

pub use engine::{IntelligenceEngine, ProcessResult};
pub use health::{HealthReport, HealthStatus};
pub use monitor::{EmergenceMonitor, IIntelligenceSource, MonitorFrame, MonitorStats};
pub use service::{IntelligenceService, Request, Response};
