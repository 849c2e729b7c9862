// ============================================================================
// Groupbot Infrastructure - Memory Store
// File: crates/groupbot-infrastructure/src/memory/store.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use groupbot_core::domain::{Group, GroupId, GroupPatch, HumanId, System, SystemId};
use groupbot_core::error::DomainError;
use groupbot_core::repositories::{GroupRepository, SystemRepository};
use groupbot_shared::constants::HID_MAX_ATTEMPTS;

use crate::hid::generate_hid;

#[derive(Default)]
struct Tables {
    systems: HashMap<SystemId, System>,
    groups: HashMap<GroupId, Group>,
}

/// Both repositories over plain maps. Each call takes the lock once, so a
/// patch lands as a single unit. The lock is never held across an await.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a system as-is, replacing any with the same id.
    pub fn insert_system(&self, system: System) {
        self.tables.write().systems.insert(system.id, system);
    }

    /// Stores a group as-is, replacing any with the same id.
    pub fn insert_group(&self, group: Group) {
        self.tables.write().groups.insert(group.id, group);
    }

    pub fn group_count(&self) -> usize {
        self.tables.read().groups.len()
    }

    fn unused_hid<F>(taken: F) -> Result<HumanId, DomainError>
    where
        F: Fn(&HumanId) -> bool,
    {
        (0..HID_MAX_ATTEMPTS)
            .map(|_| HumanId::new(generate_hid()))
            .find(|hid| !taken(hid))
            .ok_or(DomainError::UnableToGenerateHid)
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn create_group(&self, system: SystemId, name: &str) -> Result<Group, DomainError> {
        let mut tables = self.tables.write();
        if !tables.systems.contains_key(&system) {
            return Err(DomainError::SystemNotFound(system.to_string()));
        }

        let hid = Self::unused_hid(|hid| tables.groups.values().any(|g| &g.hid == hid))?;
        let group = Group::new(system, hid, name.to_string())?;
        tables.groups.insert(group.id, group.clone());

        info!("Group created successfully: {}", group.hid);
        Ok(group)
    }

    async fn update_group(&self, id: GroupId, patch: &GroupPatch) -> Result<Group, DomainError> {
        let mut tables = self.tables.write();
        let current = tables
            .groups
            .get(&id)
            .ok_or_else(|| DomainError::GroupNotFound(id.to_string()))?;

        let updated = patch.apply_to(current)?;
        tables.groups.insert(id, updated.clone());
        Ok(updated)
    }

    async fn query_groups_in_system(&self, system: SystemId) -> Result<Vec<Group>, DomainError> {
        let tables = self.tables.read();
        let mut groups: Vec<Group> = tables
            .groups
            .values()
            .filter(|g| g.system == system)
            .cloned()
            .collect();
        groups.sort_by(|a, b| (a.created_at, &a.hid).cmp(&(b.created_at, &b.hid)));

        debug!("Loaded {} groups for system {}", groups.len(), system);
        Ok(groups)
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, DomainError> {
        Ok(self.tables.read().groups.get(&id).cloned())
    }

    async fn find_by_hid(&self, hid: &str) -> Result<Option<Group>, DomainError> {
        let hid = HumanId::new(hid);
        Ok(self
            .tables
            .read()
            .groups
            .values()
            .find(|g| g.hid == hid)
            .cloned())
    }
}

#[async_trait]
impl SystemRepository for MemoryStore {
    async fn find_by_id(&self, id: SystemId) -> Result<Option<System>, DomainError> {
        Ok(self.tables.read().systems.get(&id).cloned())
    }

    async fn find_by_hid(&self, hid: &str) -> Result<Option<System>, DomainError> {
        let hid = HumanId::new(hid);
        Ok(self
            .tables
            .read()
            .systems
            .values()
            .find(|s| s.hid == hid)
            .cloned())
    }

    async fn create_system(&self, name: Option<String>) -> Result<System, DomainError> {
        let mut tables = self.tables.write();
        let hid = Self::unused_hid(|hid| tables.systems.values().any(|s| &s.hid == hid))?;
        let system = System::new(hid, name)?;
        tables.systems.insert(system.id, system.clone());

        info!("System created successfully: {}", system.hid);
        Ok(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryStore::new();
        let system = store.create_system(Some("Stars".into())).await.unwrap();
        let group = store.create_group(system.id, "Alters").await.unwrap();

        assert_eq!(group.system, system.id);
        assert!(group.description.is_none());
        assert_eq!(group.hid.as_str().len(), 5);

        let by_hid = GroupRepository::find_by_hid(&store, &group.hid.as_str().to_uppercase())
            .await
            .unwrap();
        assert_eq!(by_hid.map(|g| g.id), Some(group.id));
        let owner = SystemRepository::find_by_id(&store, system.id).await.unwrap();
        assert_eq!(owner.unwrap().name.as_deref(), Some("Stars"));
    }

    #[tokio::test]
    async fn test_create_for_unknown_system() {
        let store = MemoryStore::new();
        let err = store.create_group(SystemId::new(), "Alters").await.unwrap_err();
        assert!(matches!(err, DomainError::SystemNotFound(_)));
        assert_eq!(store.group_count(), 0);
    }

    #[tokio::test]
    async fn test_patch_round_trips() {
        let store = MemoryStore::new();
        let system = store.create_system(None).await.unwrap();
        let group = store.create_group(system.id, "Alters").await.unwrap();

        store
            .update_group(group.id, &GroupPatch::set_description(""))
            .await
            .unwrap();
        let read = GroupRepository::find_by_id(&store, group.id).await.unwrap().unwrap();
        assert_eq!(read.description.as_deref(), Some(""));

        store
            .update_group(group.id, &GroupPatch::clear_description())
            .await
            .unwrap();
        let read = GroupRepository::find_by_id(&store, group.id).await.unwrap().unwrap();
        assert!(read.description.is_none());

        let patch = GroupPatch::rename("Alts");
        let once = store.update_group(group.id, &patch).await.unwrap();
        let twice = store.update_group(group.id, &patch).await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.name, "Alts");
    }

    #[tokio::test]
    async fn test_update_missing_group() {
        let store = MemoryStore::new();
        let err = store
            .update_group(GroupId::new(), &GroupPatch::rename("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::GroupNotFound(_)));
    }

    #[tokio::test]
    async fn test_query_only_returns_own_groups() {
        let store = MemoryStore::new();
        let a = store.create_system(None).await.unwrap();
        let b = store.create_system(None).await.unwrap();
        store.create_group(a.id, "One").await.unwrap();
        store.create_group(b.id, "Two").await.unwrap();

        let listed = store.query_groups_in_system(a.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "One");
    }

    proptest! {
        #[test]
        fn prop_listing_ordered_by_creation_then_hid(
            entries in proptest::collection::vec((0i64..4, "[a-z]{5}"), 0..40)
        ) {
            let store = MemoryStore::new();
            let system = System::new(HumanId::new("owner"), None).unwrap();
            store.insert_system(system.clone());

            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            for (offset, hid) in &entries {
                let mut group = Group::new(system.id, HumanId::new(hid.as_str()), "G".into()).unwrap();
                group.created_at = base + Duration::seconds(*offset);
                store.insert_group(group);
            }

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let listed = runtime.block_on(store.query_groups_in_system(system.id)).unwrap();

            prop_assert_eq!(listed.len(), entries.len());
            for pair in listed.windows(2) {
                prop_assert!((pair[0].created_at, &pair[0].hid) <= (pair[1].created_at, &pair[1].hid));
            }
        }
    }
}
