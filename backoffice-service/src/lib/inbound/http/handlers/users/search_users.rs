use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::search::SearchQuery;
use crate::domain::user::models::USER_SEARCH_FIELDS;
use crate::inbound::http::handlers::users::UserResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::router::AppState;

pub async fn search_users(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<PageData<UserResponse>>, ApiError> {
    let query = SearchQuery::from_params(&params, &USER_SEARCH_FIELDS);

    state
        .user_service
        .search_users(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
