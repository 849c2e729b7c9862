// ============================================================================
// Groupbot Infrastructure - PostgreSQL System Repository
// File: crates/groupbot-infrastructure/src/database/postgres/system_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};
use uuid::Uuid;

use groupbot_core::domain::{HumanId, System, SystemId};
use groupbot_core::error::DomainError;
use groupbot_core::repositories::SystemRepository;
use groupbot_shared::constants::HID_MAX_ATTEMPTS;

use super::is_unique_violation;
use crate::hid::generate_hid;

const SYSTEM_COLUMNS: &str = "id, hid, name, time_zone, created_at";

pub struct PgSystemRepository {
    pool: PgPool,
}

impl PgSystemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct SystemRow {
    pub id: Uuid,
    pub hid: String,
    pub name: Option<String>,
    pub time_zone: String,
    pub created_at: DateTime<Utc>,
}

impl From<SystemRow> for System {
    fn from(row: SystemRow) -> Self {
        System {
            id: SystemId(row.id),
            hid: HumanId::new(row.hid),
            name: row.name,
            time_zone: row.time_zone,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SystemRepository for PgSystemRepository {
    async fn find_by_id(&self, id: SystemId) -> Result<Option<System>, DomainError> {
        let row: Option<SystemRow> = sqlx::query_as(&format!(
            "SELECT {SYSTEM_COLUMNS} FROM systems WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding system by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_hid(&self, hid: &str) -> Result<Option<System>, DomainError> {
        let row: Option<SystemRow> = sqlx::query_as(&format!(
            "SELECT {SYSTEM_COLUMNS} FROM systems WHERE hid = LOWER($1)"
        ))
        .bind(hid.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding system by hid: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create_system(&self, name: Option<String>) -> Result<System, DomainError> {
        for attempt in 1..=HID_MAX_ATTEMPTS {
            let system = System::new(HumanId::new(generate_hid()), name.clone())?;

            let result: Result<SystemRow, sqlx::Error> = sqlx::query_as(&format!(
                "INSERT INTO systems ({SYSTEM_COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {SYSTEM_COLUMNS}"
            ))
            .bind(system.id.0)
            .bind(system.hid.as_str())
            .bind(&system.name)
            .bind(&system.time_zone)
            .bind(system.created_at)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(row) => {
                    info!("System created successfully: {}", row.hid);
                    return Ok(row.into());
                }
                Err(e) if is_unique_violation(&e) => {
                    warn!("Human id collision on attempt {}: {}", attempt, system.hid);
                }
                Err(e) => {
                    error!("Database error creating system: {}", e);
                    return Err(DomainError::DatabaseError(e.to_string()));
                }
            }
        }

        Err(DomainError::UnableToGenerateHid)
    }
}
