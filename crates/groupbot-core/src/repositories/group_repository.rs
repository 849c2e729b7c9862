//! Group repository trait (port)

use async_trait::async_trait;

use crate::domain::{Group, GroupId, GroupPatch, SystemId};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Creates a group with a fresh human id and no description.
    async fn create_group(&self, system: SystemId, name: &str) -> Result<Group, DomainError>;

    /// Applies `patch` as one atomic update and returns the stored result.
    async fn update_group(&self, id: GroupId, patch: &GroupPatch) -> Result<Group, DomainError>;

    /// All groups of `system`, oldest first; equal timestamps order by human id.
    async fn query_groups_in_system(&self, system: SystemId) -> Result<Vec<Group>, DomainError>;

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, DomainError>;

    /// Case-insensitive lookup by human id.
    async fn find_by_hid(&self, hid: &str) -> Result<Option<Group>, DomainError>;
}
