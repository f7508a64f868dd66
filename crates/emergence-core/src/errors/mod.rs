//! Error handling for the emergence engine.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod discovery_error;
pub mod engine_error;
pub mod error_code;
pub mod storage_error;

pub use config_error::ConfigError;
pub use discovery_error::{DiscoveryError, DiscoveryResult};
pub use engine_error::{EngineError, EngineResult};
pub use error_code::EmergenceErrorCode;
pub use storage_error::{StorageError, StorageResult};
