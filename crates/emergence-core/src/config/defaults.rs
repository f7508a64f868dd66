// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_CHECKPOINT_DIR: &str = "intelligence_checkpoints";
pub const DEFAULT_ARCHIVE_DIR: &str = "data/discoveries";
pub const DEFAULT_ARCHIVE_RAW_FEATURES: bool = false;
pub const DEFAULT_CHECKPOINT_TIMEOUT_MS: u64 = 10_000;

// --- Discovery ---
pub const DEFAULT_MIN_PATTERN_STRENGTH: f64 = 0.5;
pub const DEFAULT_CROSS_MODAL_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MIN_CORRELATION: f64 = 0.3;
pub const DEFAULT_MAX_LAG: usize = 10;
pub const DEFAULT_MAX_CORRELATIONS: usize = 25;
pub const DEFAULT_META_MIN_SLOPE: f64 = 0.02;
pub const DEFAULT_UNKNOWN_VARIANCE_MULTIPLE: f64 = 1.5;

// --- Analysis ---
pub const DEFAULT_EMERGENCE_THRESHOLD: f64 = 0.8;
pub const DEFAULT_STRONG_PATTERN_THRESHOLD: f64 = 0.7;
pub const DEFAULT_TOP_PATTERNS_LIMIT: usize = 10;
pub const DEFAULT_RECENT_DISCOVERIES_LIMIT: usize = 10;

// --- Monitor ---
pub const DEFAULT_MONITOR_REFRESH_SECS: u64 = 5;
pub const DEFAULT_MONITOR_MAX_BACKOFF_SECS: u64 = 60;
pub const DEFAULT_MONITOR_RECENT_LIMIT: usize = 5;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "emergence=info";
