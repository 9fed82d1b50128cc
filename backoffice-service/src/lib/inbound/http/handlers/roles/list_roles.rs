use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::roles::RoleResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<RoleResponse>>, ApiError> {
    state
        .role_service
        .list_roles()
        .await
        .map_err(ApiError::from)
        .map(|roles| {
            ApiSuccess::new(
                StatusCode::OK,
                roles.into_iter().map(RoleResponse::from).collect(),
            )
        })
}
