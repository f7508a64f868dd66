//! # emergence-storage
//!
//! Durable, write-once snapshots of the accumulated state.
//!
//! - [`FileCheckpointStore`]: one JSON snapshot envelope plus one summary per
//!   item index, in a single directory.
//! - [`MemoryCheckpointStore`]: in-process store for embedding and tests.
//! - [`FeatureArchive`]: optional unfiltered copy of each processed bundle.

pub mod archive;
pub mod file_store;
pub mod fs_util;
pub mod memory_store;
pub mod summary;

pub use archive::{ArchivedBundle, FeatureArchive};
pub use file_store::FileCheckpointStore;
pub use memory_store::MemoryCheckpointStore;
pub use summary::CheckpointSummary;
