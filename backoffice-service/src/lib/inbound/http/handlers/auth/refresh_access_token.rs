use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::inbound::http::handlers::auth::RefreshRequest;
use crate::inbound::http::handlers::auth::RefreshResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh_access_token(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<ApiSuccess<RefreshResponse>, ApiError> {
    let Json(req) = body?;
    if req.refresh_token.is_empty() {
        return Err(ApiError::BadRequest("refreshToken is required".to_string()));
    }

    state
        .session_service
        .refresh(&req.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}
