//! IntelligenceEngine lifecycle: cold start, sequential processing, resume,
//! ordering enforcement, and degraded durability.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use emergence_core::config::EmergenceConfig;
use emergence_core::errors::{EmergenceErrorCode, EngineError};
use emergence_core::models::FeatureBundle;
use emergence_core::traits::ICheckpointStore;
use emergence_discovery::StatisticalDiscoverer;
use emergence_engine::{HealthStatus, IntelligenceEngine};
use emergence_storage::{FeatureArchive, FileCheckpointStore, MemoryCheckpointStore};

use common::{bundle, config_in, memory_engine, FlakyStore};

#[test]
fn cold_start_processes_first_item() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let store = Arc::new(
        FileCheckpointStore::open(config.storage.effective_checkpoint_dir(), config.analysis.clone())
            .unwrap(),
    );
    let mut engine = IntelligenceEngine::initialize(
        config,
        store.clone(),
        Box::new(StatisticalDiscoverer::default()),
    )
    .unwrap();
    assert_eq!(engine.snapshot().items_processed, 0);
    assert!(engine.snapshot().last_checkpoint.is_none());

    let result = engine.process(&bundle(0), 0).unwrap();
    assert!(result.checkpoint_saved);
    assert_eq!(result.items_processed, 1);

    let log = engine.recent_discoveries(10);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].pattern_count, result.discovery.patterns.len());

    let checkpoints = store.list().unwrap();
    assert_eq!(checkpoints.len(), 1);
    assert_eq!(checkpoints[0].item_index, 0);
    assert!(store.summary_path(0).exists());
}

#[test]
fn items_processed_advances_by_one_per_call() {
    let mut engine = memory_engine(Arc::new(MemoryCheckpointStore::new()));

    for i in 0..14u64 {
        let result = engine.process(&bundle(i), i).unwrap();
        assert_eq!(result.items_processed, i + 1);
        assert_eq!(engine.state().discoveries_log().len() as u64, i + 1);
        assert!(engine.state().check_invariants().is_ok());
    }

    let view = engine.snapshot();
    assert_eq!(view.items_processed, 14);
    assert!(view.total_patterns > 0);
    assert!(view.total_correlations > 0);
    assert!(!engine.state().meta_patterns().is_empty());

    for history in engine.state().pattern_strengths().values() {
        assert!(history.windows(2).all(|w| w[0].item_index <= w[1].item_index));
    }
}

#[test]
fn resume_yields_identical_snapshot() {
    let dir = TempDir::new().unwrap();

    let before = {
        let mut engine = IntelligenceEngine::open(config_in(dir.path())).unwrap();
        for i in 0..4 {
            engine.process(&bundle(i), i).unwrap();
        }
        engine.snapshot()
    };

    let resumed = IntelligenceEngine::open(config_in(dir.path())).unwrap();
    assert_eq!(resumed.snapshot(), before);
    assert_eq!(resumed.state().next_item_index(), 4);
}

#[test]
fn resumed_engine_continues_the_sequence() {
    let dir = TempDir::new().unwrap();
    {
        let mut engine = IntelligenceEngine::open(config_in(dir.path())).unwrap();
        engine.process(&bundle(0), 0).unwrap();
        engine.process(&bundle(1), 1).unwrap();
    }

    let mut engine = IntelligenceEngine::open(config_in(dir.path())).unwrap();
    let err = engine.process(&bundle(1), 1).unwrap_err();
    assert!(matches!(err, EngineError::OutOfOrderItem { expected: 2, got: 1 }));

    let result = engine.process(&bundle(2), 2).unwrap();
    assert_eq!(result.items_processed, 3);
    assert!(result.checkpoint_saved);
}

#[test]
fn out_of_order_index_is_rejected_without_mutation() {
    let mut engine = memory_engine(Arc::new(MemoryCheckpointStore::new()));

    let err = engine.process(&bundle(0), 3).unwrap_err();
    assert!(matches!(err, EngineError::OutOfOrderItem { expected: 0, got: 3 }));
    assert_eq!(err.error_code(), "OUT_OF_ORDER_ITEM");
    assert_eq!(engine.snapshot().items_processed, 0);

    engine.process(&bundle(0), 0).unwrap();
    assert!(engine.process(&bundle(0), 0).is_err());
    assert_eq!(engine.snapshot().items_processed, 1);
}

#[test]
fn missing_audio_modality_still_processes() {
    let mut engine = memory_engine(Arc::new(MemoryCheckpointStore::new()));
    let facial_only = FeatureBundle::new()
        .with_signal("facial", "head_pose", (0..32).map(|i| (i as f64).cos()).collect())
        .with_signal("facial", "eye_gaze", (0..32).map(|i| (i as f64 * 0.5).sin()).collect());

    engine.process(&facial_only, 0).unwrap();
    let result = engine.process(&facial_only, 1).unwrap();
    assert!(result.checkpoint_saved);
    assert_eq!(engine.recent_discoveries(1)[0].correlation_count, 0);
}

#[test]
fn empty_bundle_still_processes() {
    let mut engine = memory_engine(Arc::new(MemoryCheckpointStore::new()));
    let result = engine.process(&FeatureBundle::new(), 0).unwrap();
    assert!(result.discovery.is_empty());
    assert_eq!(result.items_processed, 1);
}

#[test]
fn failed_save_keeps_merged_state() {
    let store = Arc::new(FlakyStore::failing());
    let mut engine = memory_engine(store.clone());

    let result = engine.process(&bundle(0), 0).unwrap();
    assert!(!result.checkpoint_saved);
    assert!(result.checkpoint.is_none());
    assert!(result
        .checkpoint_error
        .as_deref()
        .unwrap()
        .starts_with("[CHECKPOINT_SAVE_FAILED]"));
    assert_eq!(engine.snapshot().items_processed, 1);

    let health = engine.health();
    assert_eq!(health.status, HealthStatus::Degraded);
    assert_eq!(health.checkpoint_lag, 1);

    // Durability can be retried once the store recovers.
    store.set_failing(false);
    let info = engine.create_checkpoint().unwrap();
    assert_eq!(info.item_index, 0);
    assert_eq!(engine.health().status, HealthStatus::Healthy);
}

#[test]
fn slow_save_times_out_without_failing_process() {
    let mut config = EmergenceConfig::default();
    config.storage.checkpoint_timeout_ms = Some(20);
    let mut engine = IntelligenceEngine::initialize(
        config,
        Arc::new(FlakyStore::slow(Duration::from_millis(500))),
        Box::new(StatisticalDiscoverer::default()),
    )
    .unwrap();

    let result = engine.process(&bundle(0), 0).unwrap();
    assert!(!result.checkpoint_saved);
    assert!(result
        .checkpoint_error
        .as_deref()
        .unwrap()
        .starts_with("[CHECKPOINT_TIMEOUT]"));
    assert_eq!(result.items_processed, 1);
}

#[test]
fn create_checkpoint_is_idempotent() {
    let store = Arc::new(MemoryCheckpointStore::new());
    let mut engine = memory_engine(store.clone());

    assert!(matches!(
        engine.create_checkpoint(),
        Err(EngineError::NothingToCheckpoint)
    ));

    let saved = engine.process(&bundle(0), 0).unwrap().checkpoint.unwrap();
    let again = engine.create_checkpoint().unwrap();
    assert_eq!(again, saved);
    assert_eq!(store.len(), 1);
}

#[test]
fn corrupt_checkpoint_stops_initialization() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let checkpoints = config.storage.effective_checkpoint_dir();
    std::fs::create_dir_all(&checkpoints).unwrap();
    std::fs::write(checkpoints.join("intelligence_v000003.json"), b"\x00\x01garbage").unwrap();

    let err = IntelligenceEngine::open(config).err().unwrap();
    assert!(matches!(err, EngineError::CheckpointLoad(_)));
    assert_eq!(err.error_code(), "CHECKPOINT_LOAD_FAILED");
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = EmergenceConfig::default();
    config.analysis.emergence_threshold = Some(1.5);
    let err = IntelligenceEngine::initialize(
        config,
        Arc::new(MemoryCheckpointStore::new()),
        Box::new(StatisticalDiscoverer::default()),
    )
    .err()
    .unwrap();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn raw_features_are_archived_when_enabled() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.storage.archive_raw_features = Some(true);
    let archive = FeatureArchive::new(config.storage.effective_archive_dir());

    let mut engine = IntelligenceEngine::open(config).unwrap();
    engine.process(&bundle(0), 0).unwrap();

    assert_eq!(archive.load(0).unwrap().features, bundle(0));
}

#[test]
fn queries_reflect_accumulated_history() {
    let mut engine = memory_engine(Arc::new(MemoryCheckpointStore::new()));
    for i in 0..6 {
        engine.process(&bundle(i), i).unwrap();
    }

    let top = engine.top_patterns(3);
    assert!(!top.is_empty() && top.len() <= 3);
    assert!(top.windows(2).all(|w| w[0].average_strength >= w[1].average_strength));

    let evolution = engine.pattern_evolution();
    assert_eq!(evolution.timeline.len(), 6);
    for event in &evolution.emergence_events {
        let history = &evolution.strength_history[&event.pattern];
        assert_eq!(event.item_index, history[0].item_index);
    }

    let recent: Vec<u64> = engine.recent_discoveries(2).iter().map(|e| e.item_index).collect();
    assert_eq!(recent, vec![4, 5]);
}
