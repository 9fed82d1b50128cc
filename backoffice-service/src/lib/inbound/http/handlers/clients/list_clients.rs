use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::clients::ClientResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ClientResponse>>, ApiError> {
    state
        .client_service
        .list_clients()
        .await
        .map_err(ApiError::from)
        .map(|clients| {
            ApiSuccess::new(
                StatusCode::OK,
                clients.into_iter().map(ClientResponse::from).collect(),
            )
        })
}
