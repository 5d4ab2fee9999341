//! Global rakeback override repository.
//!
//! The override is a true singleton: the table carries a UNIQUE
//! `singleton` column, so "the" override is the only row that can exist
//! and callers never have to pick the most recent of several.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::rakeback_override::GlobalRakebackOverride;
use domain::services::override_window::is_override_active;

use crate::entities::RakebackOverrideEntity;
use crate::metrics::QueryTimer;

const SELECT_COLUMNS: &str = "id, is_active, rakeback_percentage, start_time, end_time, \
     created_by, updated_by, created_at, updated_at";

/// Repository for the singleton rakeback override.
#[derive(Clone)]
pub struct RakebackOverrideRepository {
    pool: PgPool,
}

impl RakebackOverrideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The override record, active or not. `None` if never created.
    pub async fn get(&self) -> Result<Option<GlobalRakebackOverride>, sqlx::Error> {
        let timer = QueryTimer::new("get_rakeback_override");
        let result = sqlx::query_as::<_, RakebackOverrideEntity>(&format!(
            "SELECT {SELECT_COLUMNS} FROM global_rakeback_override"
        ))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(into_model))
    }

    /// The override only if it applies right now: flagged active and inside
    /// its daily window at `now`.
    pub async fn get_active(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<GlobalRakebackOverride>, sqlx::Error> {
        let override_ = self.get().await?;
        Ok(override_.filter(|o| is_override_active(o, now)))
    }

    /// Create the override. Fails with a unique violation if one already
    /// exists; callers map that to a conflict.
    pub async fn create(
        &self,
        is_active: bool,
        rakeback_percentage: Decimal,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        created_by: Option<Uuid>,
    ) -> Result<GlobalRakebackOverride, sqlx::Error> {
        let timer = QueryTimer::new("create_rakeback_override");
        let result = sqlx::query_as::<_, RakebackOverrideEntity>(&format!(
            r#"
            INSERT INTO global_rakeback_override
                (is_active, rakeback_percentage, start_time, end_time, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(is_active)
        .bind(rakeback_percentage)
        .bind(start_time)
        .bind(end_time)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(into_model(result?))
    }

    /// Update the override in place. `None` if the id does not match the
    /// existing record.
    pub async fn update(
        &self,
        id: Uuid,
        is_active: bool,
        rakeback_percentage: Decimal,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        updated_by: Option<Uuid>,
    ) -> Result<Option<GlobalRakebackOverride>, sqlx::Error> {
        let timer = QueryTimer::new("update_rakeback_override");
        let result = sqlx::query_as::<_, RakebackOverrideEntity>(&format!(
            r#"
            UPDATE global_rakeback_override
            SET is_active = $2, rakeback_percentage = $3, start_time = $4,
                end_time = $5, updated_by = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(is_active)
        .bind(rakeback_percentage)
        .bind(start_time)
        .bind(end_time)
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(into_model))
    }

    /// Flip `is_active` to false, stamping the actor. Returns `false` when
    /// no override with that id exists.
    pub async fn disable(&self, id: Uuid, updated_by: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("disable_rakeback_override");
        let result = sqlx::query(
            r#"
            UPDATE global_rakeback_override
            SET is_active = FALSE, updated_by = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(updated_by)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}

fn into_model(entity: RakebackOverrideEntity) -> GlobalRakebackOverride {
    GlobalRakebackOverride {
        id: entity.id,
        is_active: entity.is_active,
        rakeback_percentage: entity.rakeback_percentage,
        start_time: entity.start_time,
        end_time: entity.end_time,
        created_by: entity.created_by,
        updated_by: entity.updated_by,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}
