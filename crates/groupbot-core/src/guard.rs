//! Authorization guards.
//!
//! Plain predicates over the acting system. Mutating handlers call them
//! explicitly before touching persistence; read-only handlers do not.

use tracing::warn;

use crate::domain::{Group, System};
use crate::error::DomainError;

/// Fails with [`DomainError::Unauthenticated`] when no system is resolved.
pub fn require_system(system: Option<&System>) -> Result<&System, DomainError> {
    system.ok_or_else(|| {
        warn!("Denied: command requires a registered system");
        DomainError::Unauthenticated
    })
}

/// Allows exactly the system that owns `group`.
pub fn require_own_group<'a>(
    system: Option<&'a System>,
    group: &Group,
) -> Result<&'a System, DomainError> {
    let system = require_system(system)?;
    if !group.is_owned_by(system.id) {
        warn!(
            "Denied: system {} tried to modify group {} owned by another system",
            system.hid, group.hid
        );
        return Err(DomainError::Forbidden);
    }
    Ok(system)
}

/// Capability check for viewer-dependent reply text. Not an authorization gate.
pub fn is_own_group(system: Option<&System>, group: &Group) -> bool {
    system.is_some_and(|s| group.is_owned_by(s.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HumanId, SystemId};
    use proptest::prelude::*;

    fn system(hid: &str) -> System {
        System::new(HumanId::new(hid), None).unwrap()
    }

    #[test]
    fn test_require_system() {
        assert!(matches!(require_system(None), Err(DomainError::Unauthenticated)));
        let owner = system("aaaaa");
        assert_eq!(require_system(Some(&owner)).unwrap().id, owner.id);
    }

    #[test]
    fn test_require_own_group_without_system() {
        let group = Group::new(SystemId::new(), HumanId::new("ggggg"), "G".into()).unwrap();
        assert!(matches!(
            require_own_group(None, &group),
            Err(DomainError::Unauthenticated)
        ));
        assert!(!is_own_group(None, &group));
    }

    #[test]
    fn test_owner_allowed_stranger_forbidden() {
        let owner = system("aaaaa");
        let stranger = system("bbbbb");
        let group = Group::new(owner.id, HumanId::new("ggggg"), "G".into()).unwrap();

        assert!(require_own_group(Some(&owner), &group).is_ok());
        assert!(matches!(
            require_own_group(Some(&stranger), &group),
            Err(DomainError::Forbidden)
        ));
        assert!(is_own_group(Some(&owner), &group));
        assert!(!is_own_group(Some(&stranger), &group));
    }

    proptest! {
        #[test]
        fn prop_only_matching_system_allowed(owner_bits in any::<u128>(), caller_bits in any::<u128>()) {
            let mut caller = system("ccccc");
            caller.id = SystemId(uuid::Uuid::from_u128(caller_bits));
            let group = Group::new(
                SystemId(uuid::Uuid::from_u128(owner_bits)),
                HumanId::new("ggggg"),
                "G".into(),
            ).unwrap();

            let allowed = require_own_group(Some(&caller), &group).is_ok();
            prop_assert_eq!(allowed, owner_bits == caller_bits);
            prop_assert_eq!(is_own_group(Some(&caller), &group), allowed);
        }
    }
}
