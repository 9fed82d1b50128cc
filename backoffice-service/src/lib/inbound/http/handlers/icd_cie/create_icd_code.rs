use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::inbound::http::handlers::icd_cie::CreateIcdCodeRequest;
use crate::inbound::http::handlers::icd_cie::IcdCodeResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_icd_code(
    State(state): State<AppState>,
    body: Result<Json<CreateIcdCodeRequest>, JsonRejection>,
) -> Result<ApiSuccess<IcdCodeResponse>, ApiError> {
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .icd_service
        .create_icd_code(command)
        .await
        .map_err(ApiError::from)
        .map(|icd| ApiSuccess::new(StatusCode::CREATED, icd.into()))
}
