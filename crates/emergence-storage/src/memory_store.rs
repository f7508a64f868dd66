//! In-memory checkpoint store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use emergence_core::errors::{StorageError, StorageResult};
use emergence_core::models::{AccumulationState, CheckpointInfo};
use emergence_core::traits::ICheckpointStore;

/// Write-once snapshots held in process memory. Summaries are not kept.
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    snapshots: Mutex<BTreeMap<u64, (CheckpointInfo, AccumulationState)>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    fn guard(&self) -> MutexGuard<'_, BTreeMap<u64, (CheckpointInfo, AccumulationState)>> {
        // Entries are inserted whole, so a poisoned map is still consistent.
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ICheckpointStore for MemoryCheckpointStore {
    fn save(&self, state: &AccumulationState, item_index: u64) -> StorageResult<CheckpointInfo> {
        let mut snapshots = self.guard();
        if snapshots.contains_key(&item_index) {
            return Err(StorageError::CheckpointExists { item_index });
        }
        let info = CheckpointInfo {
            item_index,
            location: format!("memory:{item_index}"),
            saved_at: Utc::now(),
        };
        snapshots.insert(item_index, (info.clone(), state.clone()));
        Ok(info)
    }

    fn load_latest(&self) -> StorageResult<Option<(CheckpointInfo, AccumulationState)>> {
        Ok(self.guard().values().next_back().cloned())
    }

    fn load(&self, item_index: u64) -> StorageResult<AccumulationState> {
        self.guard()
            .get(&item_index)
            .map(|(_, state)| state.clone())
            .ok_or(StorageError::NotFound { item_index })
    }

    fn list(&self) -> StorageResult<Vec<CheckpointInfo>> {
        Ok(self.guard().values().map(|(info, _)| info.clone()).collect())
    }

    fn contains(&self, item_index: u64) -> StorageResult<bool> {
        Ok(self.guard().contains_key(&item_index))
    }
}
