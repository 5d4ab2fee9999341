//! Read-only queries against the withdrawal ledger.
//!
//! The ledger is owned by the payments service; this repository only lists
//! rows by public identifier and computes volume aggregates for the
//! threshold checks. Sums are fetched as minor units and converted to
//! decimal major units through `shared::money`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::withdrawal::{Withdrawal, WithdrawalStatus};
use domain::services::{StoreError, VolumeWindow, WithdrawalLedger};
use shared::money::minor_units_to_decimal;

use crate::entities::WithdrawalEntity;
use crate::metrics::QueryTimer;

/// Statuses excluded from volume aggregates: money that never left.
fn excluded_statuses() -> [String; 2] {
    [
        WithdrawalStatus::Failed.to_string(),
        WithdrawalStatus::Cancelled.to_string(),
    ]
}

/// Repository for withdrawal ledger reads.
#[derive(Clone)]
pub struct WithdrawalLedgerRepository {
    pool: PgPool,
}

impl WithdrawalLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch ledger rows by public withdrawal identifier.
    pub async fn list_by_ids(
        &self,
        withdrawal_ids: &[String],
    ) -> Result<Vec<Withdrawal>, sqlx::Error> {
        let timer = QueryTimer::new("withdrawals_by_ids");
        let result = sqlx::query_as::<_, WithdrawalEntity>(
            r#"
            SELECT id, user_id, withdrawal_id, amount_minor_units, currency,
                   status, created_at, updated_at
            FROM withdrawals
            WHERE withdrawal_id = ANY($1)
            "#,
        )
        .bind(withdrawal_ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(into_model).collect())
    }
}

#[async_trait::async_trait]
impl WithdrawalLedger for WithdrawalLedgerRepository {
    async fn user_daily_volume(&self, user_id: Uuid) -> Result<Decimal, StoreError> {
        let timer = QueryTimer::new("user_daily_volume");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT CAST(COALESCE(SUM(amount_minor_units), 0) AS BIGINT)
            FROM withdrawals
            WHERE user_id = $1
              AND created_at >= date_trunc('day', NOW())
              AND status <> ALL($2)
            "#,
        )
        .bind(user_id)
        .bind(&excluded_statuses()[..])
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(minor_units_to_decimal(result?))
    }

    async fn platform_volume(&self, window: VolumeWindow) -> Result<Decimal, StoreError> {
        let (query_name, interval) = match window {
            VolumeWindow::TrailingHour => ("platform_hourly_volume", "1 hour"),
            VolumeWindow::TrailingDay => ("platform_daily_volume", "1 day"),
        };

        let timer = QueryTimer::new(query_name);
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT CAST(COALESCE(SUM(amount_minor_units), 0) AS BIGINT)
            FROM withdrawals
            WHERE created_at >= NOW() - $1::INTERVAL
              AND status <> ALL($2)
            "#,
        )
        .bind(interval)
        .bind(&excluded_statuses()[..])
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(minor_units_to_decimal(result?))
    }
}

fn into_model(entity: WithdrawalEntity) -> Withdrawal {
    Withdrawal {
        id: entity.id,
        user_id: entity.user_id,
        withdrawal_id: entity.withdrawal_id,
        amount_minor_units: entity.amount_minor_units,
        currency: entity.currency,
        status: entity.status,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}
