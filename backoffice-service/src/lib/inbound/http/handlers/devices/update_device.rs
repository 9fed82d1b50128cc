use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::device::models::DeviceId;
use crate::inbound::http::handlers::devices::DeviceResponse;
use crate::inbound::http::handlers::devices::UpdateDeviceRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_device(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateDeviceRequest>, JsonRejection>,
) -> Result<ApiSuccess<DeviceResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .device_service
        .update_device(DeviceId(id), command)
        .await
        .map_err(ApiError::from)
        .map(|device| ApiSuccess::new(StatusCode::OK, device.into()))
}
