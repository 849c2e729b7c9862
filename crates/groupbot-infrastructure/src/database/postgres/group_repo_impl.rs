// ============================================================================
// Groupbot Infrastructure - PostgreSQL Group Repository
// File: crates/groupbot-infrastructure/src/database/postgres/group_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use groupbot_core::domain::{Group, GroupId, GroupPatch, HumanId, Partial, SystemId};
use groupbot_core::error::DomainError;
use groupbot_core::repositories::GroupRepository;
use groupbot_shared::constants::HID_MAX_ATTEMPTS;

use super::is_unique_violation;
use crate::hid::generate_hid;

const GROUP_COLUMNS: &str = "id, hid, system_id, name, description, created_at";

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct GroupRow {
    pub id: Uuid,
    pub hid: String,
    pub system_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: GroupId(row.id),
            hid: HumanId::new(row.hid),
            system: SystemId(row.system_id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn create_group(&self, system: SystemId, name: &str) -> Result<Group, DomainError> {
        for attempt in 1..=HID_MAX_ATTEMPTS {
            let group = Group::new(system, HumanId::new(generate_hid()), name.to_string())?;

            let result: Result<GroupRow, sqlx::Error> = sqlx::query_as(&format!(
                "INSERT INTO groups ({GROUP_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {GROUP_COLUMNS}"
            ))
            .bind(group.id.0)
            .bind(group.hid.as_str())
            .bind(group.system.0)
            .bind(&group.name)
            .bind(&group.description)
            .bind(group.created_at)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(row) => {
                    info!("Group created successfully: {}", row.hid);
                    return Ok(row.into());
                }
                Err(e) if is_unique_violation(&e) => {
                    warn!("Human id collision on attempt {}: {}", attempt, group.hid);
                }
                Err(e) => {
                    error!("Database error creating group: {}", e);
                    return Err(DomainError::DatabaseError(e.to_string()));
                }
            }
        }

        Err(DomainError::UnableToGenerateHid)
    }

    async fn update_group(&self, id: GroupId, patch: &GroupPatch) -> Result<Group, DomainError> {
        patch.validate()?;
        if patch.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::GroupNotFound(id.to_string()));
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE groups SET ");
        {
            let mut set = builder.separated(", ");
            if let Partial::Present(name) = &patch.name {
                set.push("name = ");
                set.push_bind_unseparated(name.clone());
            }
            match &patch.description {
                Partial::Present(description) => {
                    set.push("description = ");
                    set.push_bind_unseparated(description.clone());
                }
                Partial::Null => {
                    set.push("description = NULL");
                }
                Partial::Absent => {}
            }
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id.0)
            .push(format!(" RETURNING {GROUP_COLUMNS}"));

        let row: Option<GroupRow> = builder
            .build_query_as::<GroupRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating group: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::GroupNotFound(id.to_string()))
    }

    async fn query_groups_in_system(&self, system: SystemId) -> Result<Vec<Group>, DomainError> {
        let rows: Vec<GroupRow> = sqlx::query_as(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE system_id = $1 ORDER BY created_at, hid"
        ))
        .bind(system.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing groups: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!("Loaded {} groups for system {}", rows.len(), system);
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding group by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_hid(&self, hid: &str) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE hid = LOWER($1)"
        ))
        .bind(hid.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding group by hid: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
