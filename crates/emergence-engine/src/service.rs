//! IntelligenceService: the request/response boundary around the engine.
//!
//! `process` and `checkpoint` take the write lock; every query takes the read
//! lock and returns an owned copy, so callers always see a point-in-time view.

use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::json;

use emergence_analysis::{PatternEvolution, RankedPattern};
use emergence_core::config::{ConfigOverrides, EmergenceConfig};
use emergence_core::errors::{EmergenceErrorCode, EngineError, EngineResult};
use emergence_core::models::{CheckpointInfo, DiscoveryLogEntry, FeatureBundle, StateView};

use crate::engine::{IntelligenceEngine, ProcessResult};
use crate::health::HealthReport;

/// A boundary request, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Process {
        features: FeatureBundle,
        item_index: u64,
    },
    State,
    RecentDiscoveries {
        #[serde(default)]
        limit: Option<usize>,
    },
    TopPatterns {
        #[serde(default)]
        limit: Option<usize>,
    },
    PatternEvolution,
    Checkpoint,
    Health,
}

/// A boundary response, tagged by `kind` with the payload under `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Response {
    Processed(ProcessResult),
    State(StateView),
    RecentDiscoveries(Vec<DiscoveryLogEntry>),
    TopPatterns(Vec<RankedPattern>),
    PatternEvolution(PatternEvolution),
    Checkpoint(CheckpointInfo),
    Health(HealthReport),
}

pub struct IntelligenceService {
    engine: RwLock<IntelligenceEngine>,
    recent_limit: usize,
    top_limit: usize,
}

impl IntelligenceService {
    pub fn new(engine: IntelligenceEngine) -> Self {
        let analysis = &engine.config().analysis;
        let recent_limit = analysis.effective_recent_discoveries_limit();
        let top_limit = analysis.effective_top_patterns_limit();
        Self {
            engine: RwLock::new(engine),
            recent_limit,
            top_limit,
        }
    }

    /// Host entry point: tracing, layered config rooted at `root`, file store.
    pub fn open(root: &Path, overrides: Option<&ConfigOverrides>) -> EngineResult<Self> {
        emergence_core::tracing::init_tracing();
        let config = EmergenceConfig::load(root, overrides)?;
        Ok(Self::new(IntelligenceEngine::open(config)?))
    }

    pub fn handle(&self, request: Request) -> EngineResult<Response> {
        match request {
            Request::Process {
                features,
                item_index,
            } => self.process(&features, item_index).map(Response::Processed),
            Request::State => self.snapshot().map(Response::State),
            Request::RecentDiscoveries { limit } => self
                .recent_discoveries(limit.unwrap_or(self.recent_limit))
                .map(Response::RecentDiscoveries),
            Request::TopPatterns { limit } => self
                .top_patterns(limit.unwrap_or(self.top_limit))
                .map(Response::TopPatterns),
            Request::PatternEvolution => self.pattern_evolution().map(Response::PatternEvolution),
            Request::Checkpoint => self.create_checkpoint().map(Response::Checkpoint),
            Request::Health => self.health().map(Response::Health),
        }
    }

    /// JSON in, JSON out. Always returns a document:
    /// `{"ok": true, "response": {...}}` or
    /// `{"ok": false, "error": {"code": "...", "message": "..."}}`.
    pub fn handle_json(&self, request: &str) -> String {
        let outcome = serde_json::from_str::<Request>(request)
            .map_err(|e| EngineError::InvalidRequest(e.to_string()))
            .and_then(|request| self.handle(request));

        let body = match outcome {
            Ok(response) => json!({ "ok": true, "response": response }),
            Err(e) => json!({
                "ok": false,
                "error": { "code": e.error_code(), "message": e.to_string() },
            }),
        };
        body.to_string()
    }

    pub fn process(&self, features: &FeatureBundle, item_index: u64) -> EngineResult<ProcessResult> {
        self.write()?.process(features, item_index)
    }

    pub fn create_checkpoint(&self) -> EngineResult<CheckpointInfo> {
        self.write()?.create_checkpoint()
    }

    pub fn snapshot(&self) -> EngineResult<StateView> {
        Ok(self.read()?.snapshot())
    }

    pub fn recent_discoveries(&self, limit: usize) -> EngineResult<Vec<DiscoveryLogEntry>> {
        Ok(self.read()?.recent_discoveries(limit))
    }

    pub fn top_patterns(&self, limit: usize) -> EngineResult<Vec<RankedPattern>> {
        Ok(self.read()?.top_patterns(limit))
    }

    pub fn pattern_evolution(&self) -> EngineResult<PatternEvolution> {
        Ok(self.read()?.pattern_evolution())
    }

    pub fn health(&self) -> EngineResult<HealthReport> {
        Ok(self.read()?.health())
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, IntelligenceEngine>> {
        self.engine
            .read()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, IntelligenceEngine>> {
        self.engine
            .write()
            .map_err(|e| EngineError::LockPoisoned(e.to_string()))
    }
}
