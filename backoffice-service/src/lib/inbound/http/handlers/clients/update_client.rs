use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::client::models::ClientId;
use crate::inbound::http::handlers::clients::ClientResponse;
use crate::inbound::http::handlers::clients::UpdateClientRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_client(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateClientRequest>, JsonRejection>,
) -> Result<ApiSuccess<ClientResponse>, ApiError> {
    let Path(id) = path?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .client_service
        .update_client(ClientId(id), command)
        .await
        .map_err(ApiError::from)
        .map(|client| ApiSuccess::new(StatusCode::OK, client.into()))
}
