// ============================================================================
// Groupbot Core - Group Patch
// File: crates/groupbot-core/src/domain/patch.rs
// Description: Partial update intent for groups
// ============================================================================

use groupbot_shared::constants::{MAX_DESCRIPTION_LENGTH, MAX_GROUP_NAME_LENGTH};
use groupbot_shared::text::{char_len, normalize_line_end_spacing};

use super::group::Group;
use super::partial::Partial;
use crate::error::DomainError;

/// Partial update of a group. Untouched fields stay [`Partial::Absent`].
///
/// Persistence applies a patch as one unit; see [`GroupPatch::apply_to`] for
/// the reference semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub name: Partial<String>,
    pub description: Partial<String>,
}

impl GroupPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Partial::Present(name.into()),
            ..Self::default()
        }
    }

    /// Normalizes line endings before storing the description.
    pub fn set_description(description: &str) -> Self {
        Self {
            description: Partial::Present(normalize_line_end_spacing(description)),
            ..Self::default()
        }
    }

    pub fn clear_description() -> Self {
        Self {
            description: Partial::Null,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_absent() && self.description.is_absent()
    }

    /// Checks every present value against its limit. Nothing is truncated.
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.name {
            Partial::Null => {
                return Err(DomainError::InvalidPatch("group name cannot be cleared".into()))
            }
            Partial::Present(name) => {
                let length = char_len(name);
                if length > MAX_GROUP_NAME_LENGTH {
                    return Err(DomainError::GroupNameTooLong {
                        length,
                        max: MAX_GROUP_NAME_LENGTH,
                    });
                }
                if name.trim().is_empty() {
                    return Err(DomainError::InvalidPatch("group name cannot be empty".into()));
                }
            }
            Partial::Absent => {}
        }

        if let Partial::Present(description) = &self.description {
            let length = char_len(description);
            if length > MAX_DESCRIPTION_LENGTH {
                return Err(DomainError::DescriptionTooLong {
                    length,
                    max: MAX_DESCRIPTION_LENGTH,
                });
            }
        }

        Ok(())
    }

    /// Returns the group as it looks after this patch. Applying the same
    /// patch again yields the same group.
    pub fn apply_to(&self, group: &Group) -> Result<Group, DomainError> {
        self.validate()?;

        let mut updated = group.clone();
        if let Partial::Present(name) = &self.name {
            updated.name = name.clone();
        }
        updated.description = self.description.clone().apply_to_option(updated.description);

        Ok(updated)
    }
}
