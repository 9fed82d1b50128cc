use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::DeviceInfo;

/// Echo the device the request came from; nothing is stored.
pub async fn current_device(Extension(device): Extension<DeviceInfo>) -> ApiSuccess<DeviceInfo> {
    ApiSuccess::new(StatusCode::OK, device)
}
