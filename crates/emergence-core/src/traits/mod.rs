pub mod checkpoint_store;
pub mod discoverer;

pub use checkpoint_store::ICheckpointStore;
pub use discoverer::IDiscoverer;
