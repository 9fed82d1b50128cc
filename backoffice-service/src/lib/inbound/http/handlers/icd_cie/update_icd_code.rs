use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::icd::models::IcdCodeId;
use crate::inbound::http::handlers::icd_cie::IcdCodeResponse;
use crate::inbound::http::handlers::icd_cie::UpdateIcdCodeRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_icd_code(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateIcdCodeRequest>, JsonRejection>,
) -> Result<ApiSuccess<IcdCodeResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .icd_service
        .update_icd_code(IcdCodeId(id), command)
        .await
        .map_err(ApiError::from)
        .map(|icd| ApiSuccess::new(StatusCode::OK, icd.into()))
}
