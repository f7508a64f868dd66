//! Monitor configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Configuration for the polling emergence monitor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between polls. Default: 5.
    pub refresh_secs: Option<u64>,
    /// Upper bound on the retry backoff, in seconds. Default: 60.
    pub max_backoff_secs: Option<u64>,
    /// Recent discoveries fetched per poll. Default: 5.
    pub recent_limit: Option<usize>,
}

impl MonitorConfig {
    pub fn effective_refresh(&self) -> Duration {
        Duration::from_secs(
            self.refresh_secs
                .unwrap_or(defaults::DEFAULT_MONITOR_REFRESH_SECS),
        )
    }

    pub fn effective_max_backoff(&self) -> Duration {
        Duration::from_secs(
            self.max_backoff_secs
                .unwrap_or(defaults::DEFAULT_MONITOR_MAX_BACKOFF_SECS),
        )
    }

    pub fn effective_recent_limit(&self) -> usize {
        self.recent_limit
            .unwrap_or(defaults::DEFAULT_MONITOR_RECENT_LIMIT)
    }
}
