use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::client::models::ClientId;
use crate::inbound::http::handlers::clients::ClientResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_client(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<ClientResponse>, ApiError> {
    let Path(id) = path?;

    state
        .client_service
        .get_client(ClientId(id))
        .await
        .map_err(ApiError::from)
        .map(|client| ApiSuccess::new(StatusCode::OK, client.into()))
}
