use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::devices::device_list;
use crate::inbound::http::handlers::devices::DeviceResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_user_devices(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<Vec<DeviceResponse>>, ApiError> {
    let Path(user_id) = path?;

    state
        .device_service
        .list_user_devices(UserId(user_id))
        .await
        .map_err(ApiError::from)
        .map(device_list)
}
