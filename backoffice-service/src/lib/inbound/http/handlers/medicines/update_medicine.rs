use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::medicine::models::MedicineId;
use crate::inbound::http::handlers::medicines::MedicineResponse;
use crate::inbound::http::handlers::medicines::UpdateMedicineRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_medicine(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateMedicineRequest>, JsonRejection>,
) -> Result<ApiSuccess<MedicineResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .medicine_service
        .update_medicine(MedicineId(id), command)
        .await
        .map_err(ApiError::from)
        .map(|medicine| ApiSuccess::new(StatusCode::OK, medicine.into()))
}
