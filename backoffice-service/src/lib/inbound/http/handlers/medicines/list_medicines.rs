use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::medicines::MedicineResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_medicines(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<MedicineResponse>>, ApiError> {
    state
        .medicine_service
        .list_medicines()
        .await
        .map_err(ApiError::from)
        .map(|medicines| {
            ApiSuccess::new(
                StatusCode::OK,
                medicines.into_iter().map(MedicineResponse::from).collect(),
            )
        })
}
