//! Repository traits (ports)

pub mod group_repository;
pub mod system_repository;

pub use group_repository::GroupRepository;
pub use system_repository::SystemRepository;

#[cfg(test)]
pub use group_repository::MockGroupRepository;
#[cfg(test)]
pub use system_repository::MockSystemRepository;
