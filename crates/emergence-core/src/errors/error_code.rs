//! EmergenceErrorCode trait for the service boundary.

/// Stable machine-readable codes for every error enum.
/// Callers across the request/response boundary match on the code,
/// never on the display text.
pub trait EmergenceErrorCode {
    /// Returns the error code string (e.g., "CHECKPOINT_LOAD_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the service boundary.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DISCOVERY_ERROR: &str = "DISCOVERY_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CHECKPOINT_LOAD_FAILED: &str = "CHECKPOINT_LOAD_FAILED";
pub const CHECKPOINT_SAVE_FAILED: &str = "CHECKPOINT_SAVE_FAILED";
pub const CHECKPOINT_EXISTS: &str = "CHECKPOINT_EXISTS";
pub const CHECKPOINT_NOT_FOUND: &str = "CHECKPOINT_NOT_FOUND";
pub const CHECKPOINT_CORRUPT: &str = "CHECKPOINT_CORRUPT";
pub const CHECKPOINT_TIMEOUT: &str = "CHECKPOINT_TIMEOUT";
pub const OUT_OF_ORDER_ITEM: &str = "OUT_OF_ORDER_ITEM";
pub const NOTHING_TO_CHECKPOINT: &str = "NOTHING_TO_CHECKPOINT";
pub const LOCK_POISONED: &str = "LOCK_POISONED";
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
