use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::icd::models::ICD_SEARCH_FIELDS;
use crate::domain::search::SearchQuery;
use crate::inbound::http::handlers::icd_cie::IcdCodeResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::router::AppState;

pub async fn search_icd_codes(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<PageData<IcdCodeResponse>>, ApiError> {
    let query = SearchQuery::from_params(&params, &ICD_SEARCH_FIELDS);

    state
        .icd_service
        .search_icd_codes(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
