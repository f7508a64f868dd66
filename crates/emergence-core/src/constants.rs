/// Engine version, reported by health checks and stamped into summaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// On-disk snapshot envelope version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Pattern and correlation discovery need at least this many prior items.
pub const MIN_ITEMS_FOR_PATTERNS: u64 = 1;

/// Meta-pattern discovery runs only once `items_processed` exceeds this.
pub const META_PATTERN_MIN_ITEMS: u64 = 10;

/// Canonical descriptions are truncated to this many characters when keyed.
pub const PATTERN_KEY_DESCRIPTION_LEN: usize = 40;

/// Minimum series length for per-signal statistics.
pub const MIN_SERIES_LEN: usize = 8;
