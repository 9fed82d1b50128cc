use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::client::models::SubClientId;
use crate::inbound::http::handlers::clients::CreateProgramRequest;
use crate::inbound::http::handlers::clients::ProgramResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn add_program(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreateProgramRequest>, JsonRejection>,
) -> Result<ApiSuccess<ProgramResponse>, ApiError> {
    let Path(sub_client_id) = path?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .client_service
        .add_program(SubClientId(sub_client_id), command)
        .await
        .map_err(ApiError::from)
        .map(|program| ApiSuccess::new(StatusCode::CREATED, program.into()))
}
