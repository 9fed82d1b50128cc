use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub user_id: i64,
}

/// Confirms the bearer token is accepted and echoes its subject.
pub async fn health_check_auth(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<HealthResponse> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            user_id: user.user_id.0,
        },
    )
}
