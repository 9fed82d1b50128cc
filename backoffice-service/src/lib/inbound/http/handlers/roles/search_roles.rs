use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::role::models::ROLE_SEARCH_FIELDS;
use crate::domain::search::SearchQuery;
use crate::inbound::http::handlers::roles::RoleResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::router::AppState;

pub async fn search_roles(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<PageData<RoleResponse>>, ApiError> {
    let query = SearchQuery::from_params(&params, &ROLE_SEARCH_FIELDS);

    state
        .role_service
        .search_roles(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
