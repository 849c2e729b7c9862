//! # Groupbot Infrastructure
//!
//! Persistence adapters for the group and system repositories.

pub mod database;
pub mod hid;
pub mod memory;

pub use database::{create_pool, run_migrations, PgGroupRepository, PgSystemRepository};
pub use memory::MemoryStore;
