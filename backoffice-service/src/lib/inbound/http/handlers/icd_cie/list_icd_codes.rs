use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::handlers::icd_cie::IcdCodeResponse;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_icd_codes(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<IcdCodeResponse>>, ApiError> {
    state
        .icd_service
        .list_icd_codes()
        .await
        .map_err(ApiError::from)
        .map(|codes| {
            ApiSuccess::new(
                StatusCode::OK,
                codes.into_iter().map(IcdCodeResponse::from).collect(),
            )
        })
}
