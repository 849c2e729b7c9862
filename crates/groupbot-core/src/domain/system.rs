// ============================================================================
// Groupbot Core - System Entity
// File: crates/groupbot-core/src/domain/system.rs
// Description: Account that owns groups
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use groupbot_shared::constants::{DEFAULT_TIME_ZONE, MAX_SYSTEM_NAME_LENGTH};
use groupbot_shared::text::char_len;

use super::ids::{HumanId, SystemId};
use crate::error::DomainError;

// `validator` length bounds are u64.
const MAX_SYSTEM_NAME_LENGTH_U64: u64 = MAX_SYSTEM_NAME_LENGTH as u64;

/// Owner of groups. Loaded fresh per request and never mutated by group commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct System {
    pub id: SystemId,
    pub hid: HumanId,

    #[validate(length(max = MAX_SYSTEM_NAME_LENGTH_U64, message = "System name too long"))]
    pub name: Option<String>,

    /// IANA time zone name used when showing timestamps to this system.
    pub time_zone: String,

    pub created_at: DateTime<Utc>,
}

impl System {
    pub fn new(hid: HumanId, name: Option<String>) -> Result<Self, DomainError> {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        if let Some(name) = &name {
            let length = char_len(name);
            if length > MAX_SYSTEM_NAME_LENGTH {
                return Err(DomainError::SystemNameTooLong {
                    length,
                    max: MAX_SYSTEM_NAME_LENGTH,
                });
            }
        }

        let system = Self {
            id: SystemId::new(),
            hid,
            name,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            created_at: Utc::now(),
        };

        system.validate()?;
        Ok(system)
    }

    /// Name when set, human id otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.hid.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_system() {
        let system = System::new(HumanId::new("abcde"), Some("  Stars ".to_string())).unwrap();
        assert_eq!(system.name.as_deref(), Some("Stars"));
        assert_eq!(system.time_zone, "UTC");
        assert_eq!(system.display_name(), "Stars");
    }

    #[test]
    fn test_blank_name_becomes_none() {
        let system = System::new(HumanId::new("abcde"), Some("   ".to_string())).unwrap();
        assert!(system.name.is_none());
        assert_eq!(system.display_name(), "abcde");
    }

    #[test]
    fn test_long_name_rejected_with_length() {
        let ok = "x".repeat(MAX_SYSTEM_NAME_LENGTH);
        assert!(System::new(HumanId::new("abcde"), Some(ok)).is_ok());

        let long = "x".repeat(MAX_SYSTEM_NAME_LENGTH + 1);
        let err = System::new(HumanId::new("abcde"), Some(long)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::SystemNameTooLong { length, max }
                if length == MAX_SYSTEM_NAME_LENGTH + 1 && max == MAX_SYSTEM_NAME_LENGTH
        ));
    }
}
