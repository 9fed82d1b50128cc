use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::inbound::http::handlers::devices::CreateDeviceRequest;
use crate::inbound::http::handlers::devices::DeviceResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_device(
    State(state): State<AppState>,
    body: Result<Json<CreateDeviceRequest>, JsonRejection>,
) -> Result<ApiSuccess<DeviceResponse>, ApiError> {
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .device_service
        .create_device(command)
        .await
        .map_err(ApiError::from)
        .map(|device| ApiSuccess::new(StatusCode::CREATED, device.into()))
}
