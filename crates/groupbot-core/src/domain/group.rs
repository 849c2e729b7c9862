// ============================================================================
// Groupbot Core - Group Entity
// File: crates/groupbot-core/src/domain/group.rs
// Description: Named collection of members owned by a system
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use groupbot_shared::constants::{MAX_DESCRIPTION_LENGTH, MAX_GROUP_NAME_LENGTH};

use super::ids::{GroupId, HumanId, SystemId};

// `validator` length bounds are u64.
const MAX_GROUP_NAME_LENGTH_U64: u64 = MAX_GROUP_NAME_LENGTH as u64;
const MAX_DESCRIPTION_LENGTH_U64: u64 = MAX_DESCRIPTION_LENGTH as u64;

/// Group entity. `system` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Group {
    pub id: GroupId,
    pub hid: HumanId,
    pub system: SystemId,

    #[validate(length(min = 1, max = MAX_GROUP_NAME_LENGTH_U64, message = "Group name is empty or too long"))]
    pub name: String,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH_U64, message = "Description too long"))]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(
        system: SystemId,
        hid: HumanId,
        name: String,
    ) -> Result<Self, validator::ValidationErrors> {
        let group = Self {
            id: GroupId::new(),
            hid,
            system,
            name,
            description: None,
            created_at: Utc::now(),
        };

        group.validate()?;
        Ok(group)
    }

    pub fn is_owned_by(&self, system: SystemId) -> bool {
        self.system == system
    }
}
