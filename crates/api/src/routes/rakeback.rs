//! Global rakeback override route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminActor;

use domain::models::rakeback_override::{
    CreateOverrideRequest, GlobalRakebackOverride, UpdateOverrideRequest,
};
use persistence::repositories::RakebackOverrideRepository;

/// Admin routes, mounted under `/api/admin/v1/rakeback`.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/override", get(get_override).post(create_override))
        .route("/override/:override_id", put(update_override))
        .route("/override/:override_id/disable", post(disable_override))
}

/// Public routes, mounted under `/api/v1/rakeback`. Consumed by the
/// rakeback calculation path to resolve the effective percentage.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/override/active", get(get_active_override))
}

fn repo(state: &AppState) -> RakebackOverrideRepository {
    RakebackOverrideRepository::new(state.pool.clone())
}

/// Envelope so "no override" is an ordinary empty result, not a 404.
#[derive(Debug, Serialize)]
pub struct OverrideResponse {
    #[serde(rename = "override")]
    pub override_record: Option<GlobalRakebackOverride>,
}

/// GET /api/admin/v1/rakeback/override
///
/// The override record regardless of activation state.
async fn get_override(State(state): State<AppState>) -> Result<Json<OverrideResponse>, ApiError> {
    let override_record = repo(&state).get().await?;
    Ok(Json(OverrideResponse { override_record }))
}

/// GET /api/v1/rakeback/override/active
///
/// The override only when it applies right now: flagged active and inside
/// its daily time window.
async fn get_active_override(
    State(state): State<AppState>,
) -> Result<Json<OverrideResponse>, ApiError> {
    let override_record = repo(&state).get_active(Utc::now()).await?;
    Ok(Json(OverrideResponse { override_record }))
}

/// POST /api/admin/v1/rakeback/override
///
/// Creates the singleton override; a second create conflicts.
async fn create_override(
    State(state): State<AppState>,
    actor: AdminActor,
    Json(request): Json<CreateOverrideRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let created = repo(&state)
        .create(
            request.is_active,
            request.rakeback_percentage,
            request.start_time,
            request.end_time,
            Some(actor.admin_id),
        )
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => {
                ApiError::Conflict("A global rakeback override already exists".to_string())
            }
            other => other,
        })?;

    info!(
        admin_id = %actor.admin_id,
        override_id = %created.id,
        percentage = %created.rakeback_percentage,
        "Created global rakeback override"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/admin/v1/rakeback/override/:override_id
async fn update_override(
    State(state): State<AppState>,
    Path(override_id): Path<Uuid>,
    actor: AdminActor,
    Json(request): Json<UpdateOverrideRequest>,
) -> Result<Json<GlobalRakebackOverride>, ApiError> {
    request.validate()?;

    let updated = repo(&state)
        .update(
            override_id,
            request.is_active,
            request.rakeback_percentage,
            request.start_time,
            request.end_time,
            Some(actor.admin_id),
        )
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Rakeback override '{}' not found", override_id))
        })?;

    info!(
        admin_id = %actor.admin_id,
        override_id = %override_id,
        "Updated global rakeback override"
    );
    Ok(Json(updated))
}

/// POST /api/admin/v1/rakeback/override/:override_id/disable
async fn disable_override(
    State(state): State<AppState>,
    Path(override_id): Path<Uuid>,
    actor: AdminActor,
) -> Result<Json<serde_json::Value>, ApiError> {
    let disabled = repo(&state).disable(override_id, actor.admin_id).await?;
    if !disabled {
        return Err(ApiError::NotFound(format!(
            "Rakeback override '{}' not found",
            override_id
        )));
    }

    info!(
        admin_id = %actor.admin_id,
        override_id = %override_id,
        "Disabled global rakeback override"
    );
    Ok(Json(serde_json::json!({
        "message": "Rakeback override disabled"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn test_override_response_serialization() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let response = OverrideResponse {
            override_record: Some(GlobalRakebackOverride {
                id: Uuid::nil(),
                is_active: true,
                rakeback_percentage: dec!(15.5),
                start_time: NaiveTime::from_hms_opt(22, 0, 0),
                end_time: NaiveTime::from_hms_opt(2, 0, 0),
                created_by: None,
                updated_by: None,
                created_at: now,
                updated_at: now,
            }),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"override\":{"));
        assert!(json.contains("\"rakeback_percentage\":\"15.5\""));
        assert!(json.contains("\"start_time\":\"22:00:00\""));
    }

    #[test]
    fn test_empty_override_response() {
        let response = OverrideResponse {
            override_record: None,
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"override":null}"#
        );
    }
}
