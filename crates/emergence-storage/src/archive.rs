//! Raw-feature archive: the unfiltered bundle of every processed item.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use emergence_core::errors::{StorageError, StorageResult};
use emergence_core::models::FeatureBundle;

use crate::fs_util::{write_atomic, WriteMode};

/// One archived bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedBundle {
    pub item_index: u64,
    pub archived_at: DateTime<Utc>,
    pub features: FeatureBundle,
}

/// Directory of `raw_features_v{index:06}.json` files.
#[derive(Debug, Clone)]
pub struct FeatureArchive {
    dir: PathBuf,
}

impl FeatureArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, item_index: u64) -> PathBuf {
        self.dir.join(format!("raw_features_v{item_index:06}.json"))
    }

    pub fn store(&self, bundle: &FeatureBundle, item_index: u64) -> StorageResult<PathBuf> {
        let path = self.path_for(item_index);
        let record = ArchivedBundle {
            item_index,
            archived_at: Utc::now(),
            features: bundle.clone(),
        };
        let bytes = serde_json::to_vec(&record).map_err(|e| StorageError::Serialization {
            path: path.clone(),
            message: e.to_string(),
        })?;
        write_atomic(&path, &bytes, WriteMode::Replace)?;
        Ok(path)
    }

    pub fn load(&self, item_index: u64) -> StorageResult<ArchivedBundle> {
        let path = self.path_for(item_index);
        if !path.exists() {
            return Err(StorageError::NotFound { item_index });
        }
        let bytes = std::fs::read(&path).map_err(|e| StorageError::io(&path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
            path,
            details: e.to_string(),
        })
    }
}
