use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::role::models::RoleId;
use crate::inbound::http::handlers::roles::RoleResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_role(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<RoleResponse>, ApiError> {
    let Path(id) = path?;

    state
        .role_service
        .get_role(RoleId(id))
        .await
        .map_err(ApiError::from)
        .map(|role| ApiSuccess::new(StatusCode::OK, role.into()))
}
