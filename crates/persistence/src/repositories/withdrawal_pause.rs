//! Pause registry repository.
//!
//! One row per paused withdrawal, primary key `withdrawal_id`. Recording a
//! pause is a single atomic upsert and removal is a single atomic delete,
//! so two concurrent writers for different withdrawals can never lose each
//! other's entries. List and stats views are ordinary SQL queries joined
//! against the withdrawal ledger.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use domain::models::withdrawal_pause::PauseWithdrawalInput;
use domain::services::{PauseRegistry, StoreError};

use crate::entities::{
    PausedWithdrawalRowEntity, WithdrawalPauseEntity, WithdrawalPauseStatsEntity,
};
use crate::metrics::QueryTimer;

/// Repository for the per-withdrawal pause table.
#[derive(Clone)]
pub struct WithdrawalPauseRepository {
    pool: PgPool,
}

impl WithdrawalPauseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List paused withdrawals with ledger and requester display fields,
    /// newest pause first. Returns the page and the total pause count.
    pub async fn list_paused(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PausedWithdrawalRowEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_paused_withdrawals");

        let rows = sqlx::query_as::<_, PausedWithdrawalRowEntity>(
            r#"
            SELECT
                w.id, w.user_id, p.withdrawal_id, w.amount_minor_units,
                w.currency, w.status,
                p.pause_reason, p.paused_at, p.paused_by, p.requires_review,
                p.threshold_type, p.threshold_value, p.notes,
                w.created_at, w.updated_at,
                u.username, u.email
            FROM withdrawal_pauses p
            JOIN withdrawals w ON w.withdrawal_id = p.withdrawal_id
            LEFT JOIN users u ON u.id = w.user_id
            ORDER BY p.paused_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM withdrawal_pauses")
                .fetch_one(&self.pool)
                .await?;

        timer.record();
        Ok((rows, total))
    }

    /// Aggregate stats over the current pause set relative to now.
    pub async fn stats(&self) -> Result<WithdrawalPauseStatsEntity, sqlx::Error> {
        let timer = QueryTimer::new("withdrawal_pause_stats");
        let result = sqlx::query_as::<_, WithdrawalPauseStatsEntity>(
            r#"
            SELECT
                COUNT(*) AS total_paused,
                COUNT(*) FILTER (WHERE p.requires_review) AS pending_review,
                COUNT(*) FILTER (WHERE p.paused_at >= date_trunc('day', NOW())) AS paused_today,
                COUNT(*) FILTER (WHERE p.paused_at >= NOW() - INTERVAL '1 hour') AS paused_this_hour,
                CAST(COALESCE(SUM(w.amount_minor_units), 0) AS BIGINT) AS total_paused_amount_minor_units
            FROM withdrawal_pauses p
            LEFT JOIN withdrawals w ON w.withdrawal_id = p.withdrawal_id
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The pause row for one withdrawal, if any.
    pub async fn get(
        &self,
        withdrawal_id: &str,
    ) -> Result<Option<WithdrawalPauseEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_withdrawal_pause");
        let result = sqlx::query_as::<_, WithdrawalPauseEntity>(
            r#"
            SELECT withdrawal_id, pause_reason, paused_at, paused_by,
                   requires_review, threshold_type, threshold_value, notes
            FROM withdrawal_pauses
            WHERE withdrawal_id = $1
            "#,
        )
        .bind(withdrawal_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Approve a paused withdrawal: remove the pause and record the
    /// decision in the audit trail. The ledger status transition to
    /// processing/completed belongs to the payments service.
    pub async fn approve(
        &self,
        withdrawal_id: &str,
        admin_id: Uuid,
        notes: Option<&str>,
    ) -> Result<bool, StoreError> {
        let existed = self.unpause(withdrawal_id, Some(admin_id)).await?;
        info!(
            withdrawal_id = %withdrawal_id,
            admin_id = %admin_id,
            notes = notes.unwrap_or(""),
            action = "approved",
            "Withdrawal review decision"
        );
        Ok(existed)
    }

    /// Reject a paused withdrawal: remove the pause and record the
    /// decision. The ledger transition to failed/cancelled is external.
    pub async fn reject(
        &self,
        withdrawal_id: &str,
        admin_id: Uuid,
        notes: Option<&str>,
    ) -> Result<bool, StoreError> {
        let existed = self.unpause(withdrawal_id, Some(admin_id)).await?;
        info!(
            withdrawal_id = %withdrawal_id,
            admin_id = %admin_id,
            notes = notes.unwrap_or(""),
            action = "rejected",
            "Withdrawal review decision"
        );
        Ok(existed)
    }
}

#[async_trait::async_trait]
impl PauseRegistry for WithdrawalPauseRepository {
    async fn pause(&self, input: &PauseWithdrawalInput) -> Result<(), StoreError> {
        let timer = QueryTimer::new("pause_withdrawal");
        let result = sqlx::query(
            r#"
            INSERT INTO withdrawal_pauses
                (withdrawal_id, pause_reason, paused_at, paused_by,
                 requires_review, threshold_type, threshold_value, notes)
            VALUES ($1, $2, NOW(), $3, $4, $5, $6, $7)
            ON CONFLICT (withdrawal_id) DO UPDATE
            SET pause_reason = $2, paused_at = NOW(), paused_by = $3,
                requires_review = $4, threshold_type = $5,
                threshold_value = $6, notes = $7
            "#,
        )
        .bind(&input.withdrawal_id)
        .bind(&input.reason)
        .bind(input.paused_by)
        .bind(input.requires_review)
        .bind(input.threshold_type.map(|t| t.as_str()))
        .bind(input.threshold_value)
        .bind(&input.notes)
        .execute(&self.pool)
        .await;
        timer.record();
        result?;

        info!(
            withdrawal_id = %input.withdrawal_id,
            reason = %input.reason,
            requires_review = input.requires_review,
            "Paused withdrawal"
        );
        Ok(())
    }

    async fn unpause(
        &self,
        withdrawal_id: &str,
        admin_id: Option<Uuid>,
    ) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("unpause_withdrawal");
        let result = sqlx::query("DELETE FROM withdrawal_pauses WHERE withdrawal_id = $1")
            .bind(withdrawal_id)
            .execute(&self.pool)
            .await;
        timer.record();
        let existed = result?.rows_affected() > 0;

        if existed {
            info!(
                withdrawal_id = %withdrawal_id,
                admin_id = ?admin_id,
                "Unpaused withdrawal"
            );
        }
        Ok(existed)
    }
}
