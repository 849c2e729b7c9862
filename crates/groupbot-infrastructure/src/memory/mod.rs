//! In-process adapter used by the console `memory` backend and by tests.

pub mod store;

pub use store::MemoryStore;
