//! Admin actor extractor.
//!
//! Authentication happens at the gateway; by the time a request reaches
//! this service the acting administrator's id arrives in the `X-Admin-Id`
//! header. Endpoints that stamp `updated_by` require it.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

const ADMIN_ID_HEADER: &str = "x-admin-id";

/// The administrator performing the request.
#[derive(Debug, Clone, Copy)]
pub struct AdminActor {
    pub admin_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ADMIN_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized("Missing X-Admin-Id header".to_string())
            })?;

        let admin_id = header
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Invalid X-Admin-Id header".to_string()))?;

        Ok(AdminActor { admin_id })
    }
}
