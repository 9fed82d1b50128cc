use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::inbound::http::handlers::roles::CreateRoleRequest;
use crate::inbound::http::handlers::roles::RoleResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_role(
    State(state): State<AppState>,
    body: Result<Json<CreateRoleRequest>, JsonRejection>,
) -> Result<ApiSuccess<RoleResponse>, ApiError> {
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .role_service
        .create_role(command)
        .await
        .map_err(ApiError::from)
        .map(|role| ApiSuccess::new(StatusCode::CREATED, role.into()))
}
