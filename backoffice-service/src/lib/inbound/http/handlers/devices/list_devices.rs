use axum::extract::State;

use crate::inbound::http::handlers::devices::device_list;
use crate::inbound::http::handlers::devices::DeviceResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_devices(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<DeviceResponse>>, ApiError> {
    state
        .device_service
        .list_devices()
        .await
        .map_err(ApiError::from)
        .map(device_list)
}
