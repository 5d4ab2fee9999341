//! Withdrawal risk-control route handlers.
//!
//! Admin surface: global pause settings, threshold configuration, the
//! paused-withdrawal workbench and its stats. Submission surface: the
//! admission check called by the withdrawal path before execution.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminActor;
use crate::services::{AdmissionOutcome, WithdrawalProcessor};

use domain::models::thresholds::{
    ManualReviewSetting, ThresholdCategory, UpdateGlobalStatusRequest, UpdateManualReviewRequest,
    UpdateWithdrawalThresholdsRequest, WithdrawalGlobalStatus, WithdrawalThresholds,
};
use domain::models::withdrawal_pause::{
    PauseWithdrawalInput, PauseWithdrawalRequest, PausedWithdrawal, ReviewAction,
    WithdrawalPauseStats, WithdrawalReviewRequest,
};
use domain::services::{ConfigStore, PauseRegistry};
use persistence::entities::{PausedWithdrawalRowEntity, WithdrawalPauseStatsEntity};
use persistence::repositories::{
    SystemConfigRepository, WithdrawalLedgerRepository, WithdrawalPauseRepository,
};
use shared::pagination::{PageParams, Paginated};

/// Admin routes, mounted under `/api/admin/v1/withdrawals`.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/pause-settings",
            get(get_pause_settings).put(update_pause_settings),
        )
        .route("/thresholds", get(get_thresholds).put(update_thresholds))
        .route(
            "/manual-review",
            get(get_manual_review).put(update_manual_review),
        )
        .route("/paused", get(list_paused))
        .route(
            "/paused/:withdrawal_id",
            post(pause_withdrawal).delete(unpause_withdrawal),
        )
        .route("/paused/:withdrawal_id/review", post(review_withdrawal))
        .route("/pause-stats", get(get_pause_stats))
        .route("/pause-status", get(get_pause_status))
}

/// Submission-path routes, mounted under `/api/v1/withdrawals`.
pub fn submission_router() -> Router<AppState> {
    Router::new().route("/check", post(check_withdrawal))
}

fn config_repo(state: &AppState) -> SystemConfigRepository {
    SystemConfigRepository::new(state.pool.clone())
}

fn pause_repo(state: &AppState) -> WithdrawalPauseRepository {
    WithdrawalPauseRepository::new(state.pool.clone())
}

fn processor(
    state: &AppState,
) -> WithdrawalProcessor<SystemConfigRepository, WithdrawalPauseRepository, WithdrawalLedgerRepository>
{
    WithdrawalProcessor::new(
        config_repo(state),
        pause_repo(state),
        WithdrawalLedgerRepository::new(state.pool.clone()),
    )
}

// ============================================================================
// Global pause settings
// ============================================================================

/// GET /api/admin/v1/withdrawals/pause-settings
async fn get_pause_settings(
    State(state): State<AppState>,
) -> Result<Json<WithdrawalGlobalStatus>, ApiError> {
    let status = config_repo(&state).withdrawal_global_status().await?;
    Ok(Json(status))
}

/// PUT /api/admin/v1/withdrawals/pause-settings
///
/// Flips the global switch. Disabling stamps the pause time; re-enabling
/// clears the stored reason.
async fn update_pause_settings(
    State(state): State<AppState>,
    actor: AdminActor,
    Json(request): Json<UpdateGlobalStatusRequest>,
) -> Result<Json<WithdrawalGlobalStatus>, ApiError> {
    request.validate()?;

    let status = if request.enabled {
        WithdrawalGlobalStatus::default()
    } else {
        WithdrawalGlobalStatus {
            enabled: false,
            reason: request.reason,
            paused_at: Some(Utc::now()),
        }
    };

    config_repo(&state)
        .set_withdrawal_global_status(&status, Some(actor.admin_id))
        .await?;

    info!(
        admin_id = %actor.admin_id,
        enabled = status.enabled,
        "Updated withdrawal pause settings"
    );
    Ok(Json(status))
}

// ============================================================================
// Threshold configuration
// ============================================================================

/// GET /api/admin/v1/withdrawals/thresholds
async fn get_thresholds(
    State(state): State<AppState>,
) -> Result<Json<WithdrawalThresholds>, ApiError> {
    let thresholds = config_repo(&state).withdrawal_thresholds().await?;
    Ok(Json(thresholds))
}

/// PUT /api/admin/v1/withdrawals/thresholds
async fn update_thresholds(
    State(state): State<AppState>,
    actor: AdminActor,
    Json(request): Json<UpdateWithdrawalThresholdsRequest>,
) -> Result<Json<WithdrawalThresholds>, ApiError> {
    request.validate()?;

    let thresholds = request.into_thresholds();
    config_repo(&state)
        .set_withdrawal_thresholds(&thresholds, Some(actor.admin_id))
        .await?;

    info!(admin_id = %actor.admin_id, "Updated withdrawal thresholds");
    Ok(Json(thresholds))
}

/// GET /api/admin/v1/withdrawals/manual-review
async fn get_manual_review(
    State(state): State<AppState>,
) -> Result<Json<ManualReviewSetting>, ApiError> {
    let setting = config_repo(&state).withdrawal_manual_review().await?;
    Ok(Json(setting))
}

/// PUT /api/admin/v1/withdrawals/manual-review
async fn update_manual_review(
    State(state): State<AppState>,
    actor: AdminActor,
    Json(request): Json<UpdateManualReviewRequest>,
) -> Result<Json<ManualReviewSetting>, ApiError> {
    request.validate()?;

    let setting = ManualReviewSetting {
        enabled: request.enabled,
        threshold_amount: request.threshold_amount,
        currency: request.currency,
    };
    config_repo(&state)
        .set_withdrawal_manual_review(&setting, Some(actor.admin_id))
        .await?;

    info!(admin_id = %actor.admin_id, "Updated manual review setting");
    Ok(Json(setting))
}

// ============================================================================
// Paused-withdrawal workbench
// ============================================================================

/// GET /api/admin/v1/withdrawals/paused?limit=&offset=
async fn list_paused(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<PausedWithdrawal>>, ApiError> {
    let (rows, total) = pause_repo(&state)
        .list_paused(params.limit(), params.offset())
        .await?;

    let items = rows.into_iter().map(into_paused_withdrawal).collect();
    Ok(Json(Paginated::new(items, total, &params)))
}

/// POST /api/admin/v1/withdrawals/paused/:withdrawal_id
///
/// Admin-initiated pause of a specific withdrawal.
async fn pause_withdrawal(
    State(state): State<AppState>,
    Path(withdrawal_id): Path<String>,
    actor: AdminActor,
    Json(request): Json<PauseWithdrawalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let input = PauseWithdrawalInput {
        withdrawal_id: withdrawal_id.clone(),
        reason: request.reason,
        paused_by: Some(actor.admin_id),
        requires_review: request.requires_review,
        threshold_type: request.threshold_type,
        threshold_value: request.threshold_value,
        notes: request.notes,
    };
    pause_repo(&state).pause(&input).await?;

    info!(
        withdrawal_id = %withdrawal_id,
        admin_id = %actor.admin_id,
        "Admin paused withdrawal"
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Withdrawal '{}' paused", withdrawal_id),
        }),
    ))
}

/// DELETE /api/admin/v1/withdrawals/paused/:withdrawal_id
///
/// Removes a pause. Idempotent: unpausing an id that is not paused
/// succeeds and reports that nothing was removed.
async fn unpause_withdrawal(
    State(state): State<AppState>,
    Path(withdrawal_id): Path<String>,
    actor: AdminActor,
) -> Result<Json<UnpauseResponse>, ApiError> {
    let removed = pause_repo(&state)
        .unpause(&withdrawal_id, Some(actor.admin_id))
        .await?;

    Ok(Json(UnpauseResponse {
        withdrawal_id,
        removed,
    }))
}

/// POST /api/admin/v1/withdrawals/paused/:withdrawal_id/review
///
/// Approve or reject a paused withdrawal. The downstream ledger status
/// transition is owned by the payments service.
async fn review_withdrawal(
    State(state): State<AppState>,
    Path(withdrawal_id): Path<String>,
    actor: AdminActor,
    Json(request): Json<WithdrawalReviewRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    request.validate()?;

    let repo = pause_repo(&state);
    let existed = match request.action {
        ReviewAction::Approved => {
            repo.approve(&withdrawal_id, actor.admin_id, request.notes.as_deref())
                .await?
        }
        ReviewAction::Rejected => {
            repo.reject(&withdrawal_id, actor.admin_id, request.notes.as_deref())
                .await?
        }
    };

    if !existed {
        return Err(ApiError::NotFound(format!(
            "Withdrawal '{}' is not paused",
            withdrawal_id
        )));
    }

    Ok(Json(MessageResponse {
        message: "Withdrawal review recorded".to_string(),
    }))
}

/// GET /api/admin/v1/withdrawals/pause-stats
async fn get_pause_stats(
    State(state): State<AppState>,
) -> Result<Json<WithdrawalPauseStats>, ApiError> {
    let stats = pause_repo(&state).stats().await?;
    Ok(Json(into_stats(stats)))
}

/// GET /api/admin/v1/withdrawals/pause-status
///
/// Combined view: the global switch plus the workbench stats.
async fn get_pause_status(
    State(state): State<AppState>,
) -> Result<Json<PauseStatusResponse>, ApiError> {
    let settings = config_repo(&state).withdrawal_global_status().await?;
    let stats = pause_repo(&state).stats().await?;

    Ok(Json(PauseStatusResponse {
        settings,
        stats: into_stats(stats),
    }))
}

// ============================================================================
// Submission-path admission check
// ============================================================================

/// Request body for the admission check.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProcessWithdrawalRequest {
    #[validate(length(min = 1, max = 128, message = "Withdrawal id must be 1-128 characters"))]
    pub withdrawal_id: String,
    pub user_id: Uuid,
    #[validate(range(min = 1, message = "Amount must be positive"))]
    pub amount_minor_units: i64,
    #[validate(custom(function = "shared::validation::validate_currency_code"))]
    pub currency: String,
}

/// POST /api/v1/withdrawals/check
///
/// Runs the admission checks. A paused withdrawal is a successful
/// evaluation (HTTP 200 with outcome `paused`), not an error.
async fn check_withdrawal(
    State(state): State<AppState>,
    Json(request): Json<ProcessWithdrawalRequest>,
) -> Result<Json<AdmissionResponse>, ApiError> {
    request.validate()?;

    let outcome = processor(&state)
        .process_withdrawal_request(
            &request.withdrawal_id,
            request.user_id,
            request.amount_minor_units,
            &request.currency,
        )
        .await?;

    Ok(Json(match outcome {
        AdmissionOutcome::Approved => AdmissionResponse {
            outcome: "approved",
            reason: None,
            threshold_type: None,
        },
        AdmissionOutcome::Paused {
            reason,
            threshold_type,
        } => AdmissionResponse {
            outcome: "paused",
            reason: Some(reason),
            threshold_type,
        },
    }))
}

// ============================================================================
// Response types and conversions
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UnpauseResponse {
    pub withdrawal_id: String,
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct PauseStatusResponse {
    pub settings: WithdrawalGlobalStatus,
    pub stats: WithdrawalPauseStats,
}

#[derive(Debug, Serialize)]
pub struct AdmissionResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_type: Option<ThresholdCategory>,
}

fn into_paused_withdrawal(row: PausedWithdrawalRowEntity) -> PausedWithdrawal {
    PausedWithdrawal {
        id: row.id,
        user_id: row.user_id,
        withdrawal_id: row.withdrawal_id,
        amount_minor_units: row.amount_minor_units,
        currency: row.currency,
        status: row.status,
        pause_reason: row.pause_reason,
        paused_at: row.paused_at,
        paused_by: row.paused_by,
        requires_review: row.requires_review,
        threshold_type: row.threshold_type.as_deref().and_then(ThresholdCategory::parse),
        threshold_value: row.threshold_value,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
        username: row.username,
        email: row.email,
    }
}

fn into_stats(entity: WithdrawalPauseStatsEntity) -> WithdrawalPauseStats {
    WithdrawalPauseStats {
        total_paused: entity.total_paused,
        pending_review: entity.pending_review,
        paused_today: entity.paused_today,
        paused_this_hour: entity.paused_this_hour,
        total_paused_amount_minor_units: entity.total_paused_amount_minor_units,
    }
}
