//! # Groupbot Core - Domain Module
//!
//! Entities and partial-update types for systems and groups.

pub mod ids;
pub mod system;
pub mod group;
pub mod partial;
pub mod patch;

// Re-export all entities
pub use ids::{GroupId, HumanId, SystemId};
pub use system::System;
pub use group::Group;
pub use partial::Partial;
pub use patch::GroupPatch;
