//! Shared fixtures for engine tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use emergence_core::config::EmergenceConfig;
use emergence_core::errors::{StorageError, StorageResult};
use emergence_core::models::{AccumulationState, CheckpointInfo, FeatureBundle};
use emergence_core::traits::ICheckpointStore;
use emergence_discovery::StatisticalDiscoverer;
use emergence_engine::IntelligenceEngine;
use emergence_storage::MemoryCheckpointStore;

/// Deterministic four-modality bundle; varies slowly with `item`.
pub fn bundle(item: u64) -> FeatureBundle {
    let phase = item as f64 * 0.3;
    let energy: Vec<f64> = (0..48).map(|i| (i as f64 * 0.45 + phase).sin()).collect();
    let mut head_pose = vec![0.0; 2];
    head_pose.extend(energy.iter().take(46).map(|v| 0.8 * v));
    let scene: Vec<f64> = (0..48).map(|i| i as f64 * (0.01 + item as f64 * 0.001)).collect();
    // Trend strength of this signal rises with `item`, crossing 0.5 around item 8.
    let drift: Vec<f64> = (0..48)
        .map(|i| (2.1 * i as f64).sin() + 0.004 * item as f64 * i as f64)
        .collect();

    FeatureBundle::new()
        .with_signal("audio", "energy", energy)
        .with_signal("facial", "head_pose", head_pose)
        .with_signal("temporal", "scene_energy", scene)
        .with_signal("unknown", "drift", drift)
}

pub fn config_in(dir: &std::path::Path) -> EmergenceConfig {
    let mut config = EmergenceConfig::default();
    config.storage.checkpoint_dir = Some(dir.join("checkpoints").display().to_string());
    config.storage.archive_dir = Some(dir.join("archive").display().to_string());
    config
}

pub fn memory_engine(store: Arc<dyn ICheckpointStore>) -> IntelligenceEngine {
    IntelligenceEngine::initialize(
        EmergenceConfig::default(),
        store,
        Box::new(StatisticalDiscoverer::default()),
    )
    .unwrap()
}

/// Delegates to an in-memory store; saves fail while `failing` is set.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryCheckpointStore,
    pub failing: AtomicBool,
    pub delay: Option<Duration>,
}

impl FlakyStore {
    pub fn failing() -> Self {
        Self {
            failing: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl ICheckpointStore for FlakyStore {
    fn save(&self, state: &AccumulationState, item_index: u64) -> StorageResult<CheckpointInfo> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::io(
                "/unwritable",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
            ));
        }
        self.inner.save(state, item_index)
    }

    fn load_latest(&self) -> StorageResult<Option<(CheckpointInfo, AccumulationState)>> {
        self.inner.load_latest()
    }

    fn load(&self, item_index: u64) -> StorageResult<AccumulationState> {
        self.inner.load(item_index)
    }

    fn list(&self) -> StorageResult<Vec<CheckpointInfo>> {
        self.inner.list()
    }

    fn contains(&self, item_index: u64) -> StorageResult<bool> {
        self.inner.contains(item_index)
    }
}
