//! File-backed checkpoint store.
//!
//! Layout, one directory:
//! - `intelligence_v{index:06}.json`: snapshot envelope
//!   `{format_version, item_index, saved_at, digest, state}`, where `digest`
//!   is the BLAKE3 hex of the serialized state.
//! - `discoveries_v{index:06}.json`: [`CheckpointSummary`].
//!
//! Snapshots are never replaced. The latest checkpoint is the greatest index
//! parsed from snapshot file names. Summaries are derived data: a summary
//! missing beside its snapshot is regenerated by `save`, `load_latest` and
//! `list`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use emergence_core::config::AnalysisConfig;
use emergence_core::constants::SNAPSHOT_FORMAT_VERSION;
use emergence_core::errors::{StorageError, StorageResult};
use emergence_core::models::{AccumulationState, CheckpointInfo};
use emergence_core::traits::ICheckpointStore;

use crate::fs_util::{is_already_exists, write_atomic, WriteMode};
use crate::summary::CheckpointSummary;

const SNAPSHOT_PREFIX: &str = "intelligence_v";
const SUMMARY_PREFIX: &str = "discoveries_v";
const EXTENSION: &str = ".json";

#[derive(Serialize, Deserialize)]
struct SnapshotEnvelope {
    format_version: u32,
    item_index: u64,
    saved_at: DateTime<Utc>,
    digest: String,
    state: AccumulationState,
}

/// Checkpoint store over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    dir: PathBuf,
    analysis: AnalysisConfig,
}

impl FileCheckpointStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>, analysis: AnalysisConfig) -> StorageResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir, analysis })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self, item_index: u64) -> PathBuf {
        self.dir
            .join(format!("{SNAPSHOT_PREFIX}{item_index:06}{EXTENSION}"))
    }

    pub fn summary_path(&self, item_index: u64) -> PathBuf {
        self.dir
            .join(format!("{SUMMARY_PREFIX}{item_index:06}{EXTENSION}"))
    }

    /// Read the summary written beside a snapshot.
    pub fn load_summary(&self, item_index: u64) -> StorageResult<CheckpointSummary> {
        let path = self.summary_path(item_index);
        if !path.exists() {
            return Err(StorageError::NotFound { item_index });
        }
        let bytes = std::fs::read(&path).map_err(|e| StorageError::io(&path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt {
            path,
            details: e.to_string(),
        })
    }

    fn write_summary(&self, state: &AccumulationState, item_index: u64) -> StorageResult<()> {
        let summary = CheckpointSummary::build(state, item_index, &self.analysis);
        let path = self.summary_path(item_index);
        let bytes = serde_json::to_vec_pretty(&summary).map_err(|e| StorageError::Serialization {
            path: path.clone(),
            message: e.to_string(),
        })?;
        write_atomic(&path, &bytes, WriteMode::Replace)
    }

    /// Regenerate a missing summary from the stored snapshot.
    fn repair_summary(&self, item_index: u64) -> StorageResult<()> {
        if self.summary_path(item_index).exists() {
            return Ok(());
        }
        let (_, state) = self.read_envelope(item_index)?;
        self.write_summary(&state, item_index)?;
        info!(item_index, "regenerated missing checkpoint summary");
        Ok(())
    }

    fn read_envelope(&self, item_index: u64) -> StorageResult<(CheckpointInfo, AccumulationState)> {
        let path = self.snapshot_path(item_index);
        if !path.exists() {
            return Err(StorageError::NotFound { item_index });
        }

        let bytes = std::fs::read(&path).map_err(|e| StorageError::io(&path, e))?;
        let corrupt = |details: String| StorageError::Corrupt {
            path: path.clone(),
            details,
        };

        let envelope: SnapshotEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;

        if envelope.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(corrupt(format!(
                "unsupported format version {}",
                envelope.format_version
            )));
        }
        if envelope.item_index != item_index {
            return Err(corrupt(format!(
                "envelope index {} does not match file index {item_index}",
                envelope.item_index
            )));
        }

        let digest = state_digest(&envelope.state).map_err(|e| corrupt(e.to_string()))?;
        if digest != envelope.digest {
            return Err(corrupt("state digest mismatch".to_string()));
        }

        envelope.state.check_invariants().map_err(corrupt)?;
        if envelope.state.items_processed() != item_index + 1 {
            return Err(corrupt(format!(
                "snapshot for item {item_index} holds {} processed items",
                envelope.state.items_processed()
            )));
        }

        let info = CheckpointInfo {
            item_index,
            location: path.display().to_string(),
            saved_at: envelope.saved_at,
        };
        Ok((info, envelope.state))
    }

    /// Snapshot indices present on disk, ascending.
    fn indices(&self) -> StorageResult<Vec<u64>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let mut indices = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            let name = entry.file_name();
            if let Some(index) = name.to_str().and_then(parse_snapshot_index) {
                indices.push(index);
            }
        }
        indices.sort_unstable();
        Ok(indices)
    }
}

impl ICheckpointStore for FileCheckpointStore {
    fn save(&self, state: &AccumulationState, item_index: u64) -> StorageResult<CheckpointInfo> {
        let path = self.snapshot_path(item_index);
        if path.exists() {
            self.repair_summary(item_index)?;
            return Err(StorageError::CheckpointExists { item_index });
        }

        let saved_at = Utc::now();
        let envelope = SnapshotEnvelope {
            format_version: SNAPSHOT_FORMAT_VERSION,
            item_index,
            saved_at,
            digest: state_digest(state).map_err(|e| StorageError::Serialization {
                path: path.clone(),
                message: e.to_string(),
            })?,
            state: state.clone(),
        };
        let bytes = serde_json::to_vec(&envelope).map_err(|e| StorageError::Serialization {
            path: path.clone(),
            message: e.to_string(),
        })?;

        match write_atomic(&path, &bytes, WriteMode::CreateNew) {
            Ok(()) => {}
            Err(e) if is_already_exists(&e) => {
                return Err(StorageError::CheckpointExists { item_index });
            }
            Err(e) => return Err(e),
        }

        if let Err(e) = self.write_summary(state, item_index) {
            warn!(item_index, error = %e, "checkpoint summary not written");
        }

        debug!(item_index, path = %path.display(), bytes = bytes.len(), "snapshot written");
        Ok(CheckpointInfo {
            item_index,
            location: path.display().to_string(),
            saved_at,
        })
    }

    fn load_latest(&self) -> StorageResult<Option<(CheckpointInfo, AccumulationState)>> {
        let Some(&latest) = self.indices()?.last() else {
            return Ok(None);
        };
        let (info, state) = self.read_envelope(latest)?;
        if !self.summary_path(latest).exists() {
            match self.write_summary(&state, latest) {
                Ok(()) => info!(item_index = latest, "regenerated missing checkpoint summary"),
                Err(e) => warn!(item_index = latest, error = %e, "checkpoint summary still missing"),
            }
        }
        Ok(Some((info, state)))
    }

    fn load(&self, item_index: u64) -> StorageResult<AccumulationState> {
        self.read_envelope(item_index).map(|(_, state)| state)
    }

    fn list(&self) -> StorageResult<Vec<CheckpointInfo>> {
        self.indices()?
            .into_iter()
            .map(|item_index| -> StorageResult<CheckpointInfo> {
                if let Err(e) = self.repair_summary(item_index) {
                    warn!(item_index, error = %e, "checkpoint summary still missing");
                }
                let path = self.snapshot_path(item_index);
                let modified = std::fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .map_err(|e| StorageError::io(&path, e))?;
                Ok(CheckpointInfo {
                    item_index,
                    location: path.display().to_string(),
                    saved_at: DateTime::<Utc>::from(modified),
                })
            })
            .collect()
    }

    fn contains(&self, item_index: u64) -> StorageResult<bool> {
        Ok(self.snapshot_path(item_index).exists())
    }
}

/// BLAKE3 hex digest of the serialized state.
pub fn state_digest(state: &AccumulationState) -> Result<String, serde_json::Error> {
    let serialized = serde_json::to_vec(state)?;
    Ok(blake3::hash(&serialized).to_hex().to_string())
}

fn parse_snapshot_index(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(EXTENSION)?
        .parse()
        .ok()
}
