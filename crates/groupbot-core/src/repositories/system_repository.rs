//! System repository trait (port)

use async_trait::async_trait;

use crate::domain::{System, SystemId};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemRepository: Send + Sync {
    async fn find_by_id(&self, id: SystemId) -> Result<Option<System>, DomainError>;

    /// Case-insensitive lookup by human id.
    async fn find_by_hid(&self, hid: &str) -> Result<Option<System>, DomainError>;

    async fn create_system(&self, name: Option<String>) -> Result<System, DomainError>;
}
