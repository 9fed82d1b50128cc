use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::role::models::ROLE_SEARCH_FIELDS;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::CoincidenceParams;
use crate::inbound::http::router::AppState;

pub async fn role_coincidences(
    State(state): State<AppState>,
    Query(params): Query<CoincidenceParams>,
) -> Result<ApiSuccess<Vec<String>>, ApiError> {
    let query = params.into_query(&ROLE_SEARCH_FIELDS)?;

    state
        .role_service
        .role_coincidences(query)
        .await
        .map_err(ApiError::from)
        .map(|values| ApiSuccess::new(StatusCode::OK, values))
}
