use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::inbound::http::handlers::medicines::CreateMedicineRequest;
use crate::inbound::http::handlers::medicines::MedicineResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_medicine(
    State(state): State<AppState>,
    body: Result<Json<CreateMedicineRequest>, JsonRejection>,
) -> Result<ApiSuccess<MedicineResponse>, ApiError> {
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .medicine_service
        .create_medicine(command)
        .await
        .map_err(ApiError::from)
        .map(|medicine| ApiSuccess::new(StatusCode::CREATED, medicine.into()))
}
