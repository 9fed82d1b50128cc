use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::role::models::RoleId;
use crate::inbound::http::handlers::roles::RoleResponse;
use crate::inbound::http::handlers::roles::UpdateRoleRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_role(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<ApiSuccess<RoleResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .role_service
        .update_role(RoleId(id), command)
        .await
        .map_err(ApiError::from)
        .map(|role| ApiSuccess::new(StatusCode::OK, role.into()))
}
