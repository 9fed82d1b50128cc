use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::device::models::DEVICE_SEARCH_FIELDS;
use crate::domain::search::SearchQuery;
use crate::inbound::http::handlers::devices::DeviceResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PageData;
use crate::inbound::http::router::AppState;

pub async fn search_devices(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<PageData<DeviceResponse>>, ApiError> {
    let query = SearchQuery::from_params(&params, &DEVICE_SEARCH_FIELDS);

    state
        .device_service
        .search_devices(query)
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}
