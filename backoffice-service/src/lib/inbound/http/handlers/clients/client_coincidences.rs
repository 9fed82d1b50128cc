use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::client::models::CLIENT_SEARCH_FIELDS;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CoincidenceParams;
use crate::inbound::http::router::AppState;

pub async fn client_coincidences(
    State(state): State<AppState>,
    Query(params): Query<CoincidenceParams>,
) -> Result<ApiSuccess<Vec<String>>, ApiError> {
    let query = params.into_query(&CLIENT_SEARCH_FIELDS)?;

    state
        .client_service
        .client_coincidences(query)
        .await
        .map_err(ApiError::from)
        .map(|values| ApiSuccess::new(StatusCode::OK, values))
}
