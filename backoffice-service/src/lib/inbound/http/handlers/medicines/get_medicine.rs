use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::medicine::models::MedicineId;
use crate::inbound::http::handlers::medicines::MedicineResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_medicine(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<MedicineResponse>, ApiError> {
    let Path(id) = path?;

    state
        .medicine_service
        .get_medicine(MedicineId(id))
        .await
        .map_err(ApiError::from)
        .map(|medicine| ApiSuccess::new(StatusCode::OK, medicine.into()))
}
