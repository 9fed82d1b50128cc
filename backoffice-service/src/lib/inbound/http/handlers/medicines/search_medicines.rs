use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::medicine::models::MEDICINE_SEARCH_FIELDS;
use crate::domain::search::SearchQuery;
use crate::inbound::http::handlers::medicines::MedicineResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::router::AppState;

pub async fn search_medicines(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<PageData<MedicineResponse>>, ApiError> {
    let query = SearchQuery::from_params(&params, &MEDICINE_SEARCH_FIELDS);

    state
        .medicine_service
        .search_medicines(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
