use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::inbound::http::handlers::clients::ClientResponse;
use crate::inbound::http::handlers::clients::CreateClientRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    body: Result<Json<CreateClientRequest>, JsonRejection>,
) -> Result<ApiSuccess<ClientResponse>, ApiError> {
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .client_service
        .create_client(command)
        .await
        .map_err(ApiError::from)
        .map(|client| ApiSuccess::new(StatusCode::CREATED, client.into()))
}
