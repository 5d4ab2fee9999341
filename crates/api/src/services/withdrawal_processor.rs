//! Withdrawal admission orchestration.
//!
//! Runs the admission checks for one withdrawal request in a fixed order,
//! short-circuiting on the first violated rule, and owns the periodic
//! volume sweep that can pause the whole pipeline. Exactly one pause
//! reason is ever recorded per request: the first rule that failed.
//!
//! Rule order: global switch, then single transaction, then user daily,
//! then hourly volume, then daily volume, then the manual-review
//! catch-all. Global pause wins over every per-request limit; per-request
//! limits run from most specific to most aggregate.

use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use tracing::{error, info};
use uuid::Uuid;

use domain::models::thresholds::ThresholdCategory;
use domain::models::withdrawal_pause::PauseWithdrawalInput;
use domain::services::threshold_eval::{
    evaluate_limit, global_status_refusal, manual_review_verdict, ThresholdVerdict,
};
use domain::services::{ConfigStore, PauseRegistry, StoreError, VolumeWindow, WithdrawalLedger};
use shared::money::{format_amount, minor_units_to_decimal};

/// Result of an admission check. A paused withdrawal is a successful
/// evaluation, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionOutcome {
    /// All checks passed; the withdrawal may proceed downstream. No state
    /// was written.
    Approved,
    /// The withdrawal was paused by the named rule.
    Paused {
        reason: String,
        threshold_type: Option<ThresholdCategory>,
    },
}

/// Failures during admission checking or the volume sweep.
///
/// Any storage failure stops evaluation: a broken read must never pass as
/// "threshold not exceeded", and a withdrawal whose pause record could not
/// be written must not proceed.
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to record pause for withdrawal '{withdrawal_id}': {source}")]
    PauseWrite {
        withdrawal_id: String,
        #[source]
        source: StoreError,
    },
}

/// Orchestrates the admission decision over the config store, the pause
/// registry and the withdrawal ledger.
pub struct WithdrawalProcessor<C, P, L> {
    config_store: C,
    pause_registry: P,
    ledger: L,
}

impl<C, P, L> WithdrawalProcessor<C, P, L>
where
    C: ConfigStore,
    P: PauseRegistry,
    L: WithdrawalLedger,
{
    pub fn new(config_store: C, pause_registry: P, ledger: L) -> Self {
        Self {
            config_store,
            pause_registry,
            ledger,
        }
    }

    /// Runs the admission checks for one withdrawal request.
    pub async fn process_withdrawal_request(
        &self,
        withdrawal_id: &str,
        user_id: Uuid,
        amount_minor_units: i64,
        currency: &str,
    ) -> Result<AdmissionOutcome, ProcessorError> {
        info!(
            withdrawal_id = %withdrawal_id,
            user_id = %user_id,
            amount_minor_units,
            currency = %currency,
            "Processing withdrawal request"
        );

        // 1. Global switch; wins over every per-request limit.
        let status = self.config_store.withdrawal_global_status().await?;
        if let Some(reason) = global_status_refusal(&status) {
            info!(withdrawal_id = %withdrawal_id, reason = %reason, "Withdrawal blocked - global pause");
            return self.pause(withdrawal_id, reason, None, None).await;
        }

        let amount = minor_units_to_decimal(amount_minor_units);
        let thresholds = self.config_store.withdrawal_thresholds().await?;

        // 2. Single transaction limit against the raw amount.
        if let ThresholdVerdict::Exceeded { reason } = evaluate_limit(
            ThresholdCategory::SingleTransaction,
            amount,
            currency,
            &thresholds.single_transaction,
        ) {
            info!(withdrawal_id = %withdrawal_id, reason = %reason, "Withdrawal blocked - single transaction threshold exceeded");
            return self
                .pause(
                    withdrawal_id,
                    reason,
                    Some(ThresholdCategory::SingleTransaction),
                    Some(amount),
                )
                .await;
        }

        // 3. The requesting user's volume already withdrawn today. The
        // aggregate query only runs when the limit is configured.
        if thresholds.user_daily.enabled {
            let user_volume = self.ledger.user_daily_volume(user_id).await?;
            if let ThresholdVerdict::Exceeded { reason } = evaluate_limit(
                ThresholdCategory::UserDaily,
                user_volume,
                &thresholds.user_daily.currency,
                &thresholds.user_daily,
            ) {
                info!(withdrawal_id = %withdrawal_id, reason = %reason, "Withdrawal blocked - user daily threshold exceeded");
                return self
                    .pause(
                        withdrawal_id,
                        reason,
                        Some(ThresholdCategory::UserDaily),
                        Some(amount),
                    )
                    .await;
            }
        }

        // 4. Platform-wide volume in the trailing hour.
        if thresholds.hourly_volume.enabled {
            let hourly = self.ledger.platform_volume(VolumeWindow::TrailingHour).await?;
            if let ThresholdVerdict::Exceeded { reason } = evaluate_limit(
                ThresholdCategory::HourlyVolume,
                hourly,
                &thresholds.hourly_volume.currency,
                &thresholds.hourly_volume,
            ) {
                info!(withdrawal_id = %withdrawal_id, reason = %reason, "Withdrawal blocked - hourly volume threshold exceeded");
                return self
                    .pause(
                        withdrawal_id,
                        reason,
                        Some(ThresholdCategory::HourlyVolume),
                        Some(amount),
                    )
                    .await;
            }
        }

        // 5. Platform-wide volume in the trailing day.
        if thresholds.daily_volume.enabled {
            let daily = self.ledger.platform_volume(VolumeWindow::TrailingDay).await?;
            if let ThresholdVerdict::Exceeded { reason } = evaluate_limit(
                ThresholdCategory::DailyVolume,
                daily,
                &thresholds.daily_volume.currency,
                &thresholds.daily_volume,
            ) {
                info!(withdrawal_id = %withdrawal_id, reason = %reason, "Withdrawal blocked - daily volume threshold exceeded");
                return self
                    .pause(
                        withdrawal_id,
                        reason,
                        Some(ThresholdCategory::DailyVolume),
                        Some(amount),
                    )
                    .await;
            }
        }

        // 6. Manual-review catch-all (inclusive boundary).
        let manual_review = self.config_store.withdrawal_manual_review().await?;
        if let ThresholdVerdict::Exceeded { reason } =
            manual_review_verdict(amount, currency, &manual_review)
        {
            info!(withdrawal_id = %withdrawal_id, reason = %reason, "Withdrawal requires manual review");
            return self
                .pause(
                    withdrawal_id,
                    reason,
                    Some(ThresholdCategory::ManualReview),
                    Some(amount),
                )
                .await;
        }

        // 7. All checks passed.
        info!(withdrawal_id = %withdrawal_id, "Withdrawal approved for processing");
        counter!("withdrawal_admission_total", "outcome" => "approved").increment(1);
        Ok(AdmissionOutcome::Approved)
    }

    /// Records a pause and returns the paused outcome. A failed write is
    /// an error: the withdrawal must not proceed just because the audit
    /// record could not be persisted.
    async fn pause(
        &self,
        withdrawal_id: &str,
        reason: String,
        threshold_type: Option<ThresholdCategory>,
        threshold_value: Option<Decimal>,
    ) -> Result<AdmissionOutcome, ProcessorError> {
        let input = PauseWithdrawalInput::system(
            withdrawal_id,
            reason.clone(),
            threshold_type,
            threshold_value,
        );

        self.pause_registry.pause(&input).await.map_err(|source| {
            error!(withdrawal_id = %withdrawal_id, error = %source, "Failed to record withdrawal pause");
            ProcessorError::PauseWrite {
                withdrawal_id: withdrawal_id.to_string(),
                source,
            }
        })?;

        counter!("withdrawal_admission_total", "outcome" => "paused").increment(1);
        Ok(AdmissionOutcome::Paused {
            reason,
            threshold_type,
        })
    }

    /// Periodic sweep: re-checks the platform volume limits and, when one
    /// is exceeded, disables all withdrawals until an administrator
    /// re-enables them. Does not touch per-withdrawal pauses. Returns the
    /// category that tripped, if any.
    pub async fn check_volume_thresholds(
        &self,
    ) -> Result<Option<ThresholdCategory>, ProcessorError> {
        let thresholds = self.config_store.withdrawal_thresholds().await?;

        if thresholds.hourly_volume.enabled {
            let hourly = self.ledger.platform_volume(VolumeWindow::TrailingHour).await?;
            if hourly > thresholds.hourly_volume.value {
                self.trip_global_pause(
                    ThresholdCategory::HourlyVolume,
                    hourly,
                    thresholds.hourly_volume.value,
                    &thresholds.hourly_volume.currency,
                )
                .await?;
                return Ok(Some(ThresholdCategory::HourlyVolume));
            }
        }

        if thresholds.daily_volume.enabled {
            let daily = self.ledger.platform_volume(VolumeWindow::TrailingDay).await?;
            if daily > thresholds.daily_volume.value {
                self.trip_global_pause(
                    ThresholdCategory::DailyVolume,
                    daily,
                    thresholds.daily_volume.value,
                    &thresholds.daily_volume.currency,
                )
                .await?;
                return Ok(Some(ThresholdCategory::DailyVolume));
            }
        }

        Ok(None)
    }

    async fn trip_global_pause(
        &self,
        category: ThresholdCategory,
        volume: Decimal,
        limit: Decimal,
        currency: &str,
    ) -> Result<(), ProcessorError> {
        let reason = format!(
            "{} threshold exceeded: {} {} (limit: {} {})",
            capitalize(category.display_name()),
            format_amount(volume),
            currency,
            format_amount(limit),
            currency
        );

        info!(
            category = %category,
            volume = %volume,
            limit = %limit,
            "Volume threshold exceeded, pausing new withdrawals"
        );

        let status = domain::models::thresholds::WithdrawalGlobalStatus {
            enabled: false,
            reason: Some(reason),
            paused_at: Some(Utc::now()),
        };
        self.config_store
            .set_withdrawal_global_status(&status, None)
            .await?;

        counter!("withdrawal_volume_sweep_trips_total", "category" => category.as_str())
            .increment(1);
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
