use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::device::models::DeviceId;
use crate::inbound::http::handlers::devices::DeviceResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_device(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<DeviceResponse>, ApiError> {
    let Path(id) = path?;

    state
        .device_service
        .get_device(DeviceId(id))
        .await
        .map_err(ApiError::from)
        .map(|device| ApiSuccess::new(StatusCode::OK, device.into()))
}
