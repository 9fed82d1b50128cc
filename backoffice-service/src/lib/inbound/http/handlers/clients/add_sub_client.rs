use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::client::models::ClientId;
use crate::inbound::http::handlers::clients::CreateSubClientRequest;
use crate::inbound::http::handlers::clients::SubClientResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn add_sub_client(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreateSubClientRequest>, JsonRejection>,
) -> Result<ApiSuccess<SubClientResponse>, ApiError> {
    let Path(client_id) = path?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    state
        .client_service
        .add_sub_client(ClientId(client_id), command)
        .await
        .map_err(ApiError::from)
        .map(|sub_client| ApiSuccess::new(StatusCode::CREATED, sub_client.into()))
}
