//! # Groupbot Core
//!
//! Domain entities, authorization guards, repository traits, and the group
//! command handlers.

pub mod context;
pub mod domain;
pub mod error;
pub mod guard;
pub mod paginator;
pub mod reply;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
