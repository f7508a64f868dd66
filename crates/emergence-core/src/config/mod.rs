//! Configuration system for the emergence engine.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod analysis_config;
pub mod defaults;
pub mod discovery_config;
pub mod emergence_config;
pub mod monitor_config;
pub mod storage_config;

pub use analysis_config::AnalysisConfig;
pub use discovery_config::DiscoveryConfig;
pub use emergence_config::{ConfigOverrides, EmergenceConfig};
pub use monitor_config::MonitorConfig;
pub use storage_config::StorageConfig;
