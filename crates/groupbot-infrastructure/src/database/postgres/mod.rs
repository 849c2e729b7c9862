//! PostgreSQL repository implementations

pub mod group_repo_impl;
pub mod system_repo_impl;

pub use group_repo_impl::PgGroupRepository;
pub use system_repo_impl::PgSystemRepository;

/// True when `error` is a unique-constraint violation, e.g. a human id collision.
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
