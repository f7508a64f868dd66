//! IntelligenceEngine: the single owner of the accumulated state.
//!
//! Per item: validate index → discover against the pre-merge state → merge →
//! archive (optional) → checkpoint with a bounded timeout. The merge is
//! committed before the checkpoint is attempted, so a failed or slow save
//! only degrades durability.

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use emergence_analysis::{pattern_evolution, top_patterns, PatternEvolution, RankedPattern};
use emergence_core::config::EmergenceConfig;
use emergence_core::constants::VERSION;
use emergence_core::errors::{
    EmergenceErrorCode, EngineError, EngineResult, StorageError, StorageResult,
};
use emergence_core::models::{
    AccumulationState, CheckpointInfo, Discovery, DiscoveryLogEntry, FeatureBundle, StateView,
};
use emergence_core::traits::{ICheckpointStore, IDiscoverer};
use emergence_discovery::{DiscoveryPipeline, StatisticalDiscoverer};
use emergence_storage::{FeatureArchive, FileCheckpointStore};

use crate::health::HealthReport;

/// Outcome of one `process()` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub discovery: Discovery,
    pub items_processed: u64,
    pub checkpoint_saved: bool,
    pub checkpoint: Option<CheckpointInfo>,
    /// Coded error text when the checkpoint was not saved.
    pub checkpoint_error: Option<String>,
}

/// The sequential intelligence accumulation engine.
pub struct IntelligenceEngine {
    config: EmergenceConfig,
    state: AccumulationState,
    store: Arc<dyn ICheckpointStore>,
    pipeline: DiscoveryPipeline,
    archive: Option<FeatureArchive>,
    last_checkpoint: Option<CheckpointInfo>,
}

impl IntelligenceEngine {
    /// Resume from the latest checkpoint in `store`, or cold-start if it has none.
    ///
    /// An unreadable latest checkpoint fails with `CheckpointLoad`; no fresh
    /// state is substituted.
    pub fn initialize(
        config: EmergenceConfig,
        store: Arc<dyn ICheckpointStore>,
        discoverer: Box<dyn IDiscoverer>,
    ) -> EngineResult<Self> {
        EmergenceConfig::validate(&config)?;

        let (state, last_checkpoint) = match store.load_latest() {
            Ok(Some((info, state))) => {
                info!(
                    items_processed = state.items_processed(),
                    checkpoint = info.item_index,
                    location = %info.location,
                    "resumed from checkpoint"
                );
                (state, Some(info))
            }
            Ok(None) => {
                info!("no checkpoint found, cold start");
                (AccumulationState::new(Utc::now()), None)
            }
            Err(e) => {
                error!(error = %e, code = e.error_code(), "checkpoint load failed");
                return Err(EngineError::CheckpointLoad(e));
            }
        };

        let archive = config
            .storage
            .effective_archive_raw_features()
            .then(|| FeatureArchive::new(config.storage.effective_archive_dir()));

        let pipeline = DiscoveryPipeline::new(discoverer, &config.analysis);

        Ok(Self {
            config,
            state,
            store,
            pipeline,
            archive,
            last_checkpoint,
        })
    }

    /// File-backed store under the configured checkpoint directory and the
    /// default statistical discoverer.
    pub fn open(config: EmergenceConfig) -> EngineResult<Self> {
        let store = FileCheckpointStore::open(
            config.storage.effective_checkpoint_dir(),
            config.analysis.clone(),
        )?;
        let discoverer = StatisticalDiscoverer::new(config.discovery.clone());
        Self::initialize(config, Arc::new(store), Box::new(discoverer))
    }

    /// Process the next item. `item_index` must equal `items_processed`.
    pub fn process(&mut self, bundle: &FeatureBundle, item_index: u64) -> EngineResult<ProcessResult> {
        let expected = self.state.next_item_index();
        if item_index != expected {
            warn!(expected, got = item_index, "rejecting out-of-order item");
            return Err(EngineError::OutOfOrderItem {
                expected,
                got: item_index,
            });
        }

        let discovery = self.pipeline.run(bundle, &self.state, item_index);
        self.state.absorb(&discovery, Utc::now());

        if let Some(archive) = &self.archive {
            if let Err(e) = archive.store(bundle, item_index) {
                warn!(item_index, error = %e, "raw feature archive write failed");
            }
        }

        let (checkpoint_saved, checkpoint, checkpoint_error) =
            match self.save_checkpoint(item_index) {
                Ok(info) => {
                    self.last_checkpoint = Some(info.clone());
                    (true, Some(info), None)
                }
                Err(e) => {
                    let err = EngineError::CheckpointSave(e);
                    error!(item_index, code = err.error_code(), error = %err, "checkpoint not saved");
                    (false, None, Some(err.coded_string()))
                }
            };

        info!(
            item_index,
            patterns = discovery.patterns.len(),
            correlations = discovery.correlations.len(),
            unknown = discovery.unknown.len(),
            meta_patterns = discovery.meta_patterns.len(),
            checkpoint_saved,
            "item processed"
        );

        Ok(ProcessResult {
            discovery,
            items_processed: self.state.items_processed(),
            checkpoint_saved,
            checkpoint,
            checkpoint_error,
        })
    }

    /// Persist the current state at index `items_processed - 1`.
    ///
    /// Idempotent: an existing snapshot at that index is reported rather than
    /// replaced.
    pub fn create_checkpoint(&mut self) -> EngineResult<CheckpointInfo> {
        let item_index = self
            .state
            .items_processed()
            .checked_sub(1)
            .ok_or(EngineError::NothingToCheckpoint)?;

        let info = match self.save_checkpoint(item_index) {
            Ok(info) => info,
            Err(StorageError::CheckpointExists { .. }) => self
                .store
                .list()?
                .into_iter()
                .find(|info| info.item_index == item_index)
                .ok_or(StorageError::NotFound { item_index })?,
            Err(e) => return Err(EngineError::CheckpointSave(e)),
        };

        info!(item_index, location = %info.location, "manual checkpoint");
        self.last_checkpoint = Some(info.clone());
        Ok(info)
    }

    pub fn snapshot(&self) -> StateView {
        StateView::from_state(&self.state, self.last_checkpoint.clone())
    }

    /// The last `limit` log entries, oldest first.
    pub fn recent_discoveries(&self, limit: usize) -> Vec<DiscoveryLogEntry> {
        self.state.recent_discoveries(limit).to_vec()
    }

    pub fn top_patterns(&self, limit: usize) -> Vec<RankedPattern> {
        top_patterns(&self.state, limit)
    }

    pub fn pattern_evolution(&self) -> PatternEvolution {
        pattern_evolution(&self.state, self.config.analysis.effective_emergence_threshold())
    }

    pub fn health(&self) -> HealthReport {
        HealthReport::new(
            self.state.items_processed(),
            self.last_checkpoint.clone(),
            self.pipeline.discoverer_name(),
            VERSION,
        )
    }

    pub fn state(&self) -> &AccumulationState {
        &self.state
    }

    pub fn config(&self) -> &EmergenceConfig {
        &self.config
    }

    pub fn last_checkpoint(&self) -> Option<&CheckpointInfo> {
        self.last_checkpoint.as_ref()
    }

    /// Save on a writer thread, waiting at most the configured timeout.
    /// On timeout the write may still complete in the background.
    fn save_checkpoint(&self, item_index: u64) -> StorageResult<CheckpointInfo> {
        let timeout_ms = self.config.storage.effective_checkpoint_timeout_ms();
        let store = Arc::clone(&self.store);
        let state = self.state.clone();
        let (tx, rx) = mpsc::channel();

        let spawned = std::thread::Builder::new()
            .name(format!("emergence-checkpoint-{item_index}"))
            .spawn(move || {
                let _ = tx.send(store.save(&state, item_index));
            });
        if let Err(e) = spawned {
            warn!(item_index, error = %e, "checkpoint thread unavailable, saving inline");
            return self.store.save(&self.state, item_index);
        }

        match rx.recv_timeout(Duration::from_millis(timeout_ms)) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(StorageError::Timeout {
                item_index,
                timeout_ms,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(StorageError::io(
                PathBuf::from(format!("checkpoint:{item_index}")),
                std::io::Error::other("checkpoint writer exited without a result"),
            )),
        }
    }
}
