use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::icd::models::IcdCodeId;
use crate::inbound::http::handlers::icd_cie::IcdCodeResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_icd_code(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<IcdCodeResponse>, ApiError> {
    let Path(id) = path?;

    state
        .icd_service
        .get_icd_code(IcdCodeId(id))
        .await
        .map_err(ApiError::from)
        .map(|icd| ApiSuccess::new(StatusCode::OK, icd.into()))
}
