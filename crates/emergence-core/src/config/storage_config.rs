//! Checkpoint storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Configuration for the checkpoint store and raw-feature archive.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding snapshots and summaries.
    pub checkpoint_dir: Option<String>,
    /// Directory holding archived raw feature bundles.
    pub archive_dir: Option<String>,
    /// Archive every processed bundle unfiltered. Default: false.
    pub archive_raw_features: Option<bool>,
    /// Bound on a single checkpoint write, in milliseconds. Must be non-zero.
    pub checkpoint_timeout_ms: Option<u64>,
}

impl StorageConfig {
    pub fn effective_checkpoint_dir(&self) -> PathBuf {
        PathBuf::from(
            self.checkpoint_dir
                .as_deref()
                .unwrap_or(defaults::DEFAULT_CHECKPOINT_DIR),
        )
    }

    pub fn effective_archive_dir(&self) -> PathBuf {
        PathBuf::from(
            self.archive_dir
                .as_deref()
                .unwrap_or(defaults::DEFAULT_ARCHIVE_DIR),
        )
    }

    pub fn effective_archive_raw_features(&self) -> bool {
        self.archive_raw_features
            .unwrap_or(defaults::DEFAULT_ARCHIVE_RAW_FEATURES)
    }

    pub fn effective_checkpoint_timeout_ms(&self) -> u64 {
        self.checkpoint_timeout_ms
            .unwrap_or(defaults::DEFAULT_CHECKPOINT_TIMEOUT_MS)
    }
}
