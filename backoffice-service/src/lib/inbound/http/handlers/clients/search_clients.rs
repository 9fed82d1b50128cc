use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::client::models::CLIENT_SEARCH_FIELDS;
use crate::domain::search::SearchQuery;
use crate::inbound::http::handlers::clients::ClientResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::router::AppState;

pub async fn search_clients(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<PageData<ClientResponse>>, ApiError> {
    let query = SearchQuery::from_params(&params, &CLIENT_SEARCH_FIELDS);

    state
        .client_service
        .search_clients(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
