use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchFields;

pub mod auth;
pub mod clients;
pub mod devices;
pub mod health;
pub mod icd_cie;
pub mod medicines;
pub mod roles;
pub mod users;

/// Message returned in place of internal failure details.
pub const MASKED_ERROR_MESSAGE: &str = "We are working to improve the flow of this request.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DomainError::Validation(_) => ApiError::BadRequest(err.to_string()),
            DomainError::AlreadyExists { .. } | DomainError::Conflict(_) => {
                ApiError::Conflict(err.to_string())
            }
            DomainError::NotAuthenticated(_) => ApiError::Unauthorized(err.to_string()),
            DomainError::NotAuthorized(_) => ApiError::Forbidden(err.to_string()),
            DomainError::Repository(_)
            | DomainError::TokenGenerator(_)
            | DomainError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(MASKED_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Confirmation body for deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{} deleted successfully", entity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T: Serialize + PartialEq> {
    pub current_page: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub total_pages: i64,
    pub records: Vec<T>,
}

impl<D, T> From<Page<D>> for PageData<T>
where
    T: Serialize + PartialEq + From<D>,
{
    fn from(page: Page<D>) -> Self {
        let page = page.map(T::from);
        Self {
            current_page: page.current_page,
            page_size: page.page_size,
            total_records: page.total_records,
            total_pages: page.total_pages,
            records: page.records,
        }
    }
}

/// Query string of the `search-by-property` routes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoincidenceParams {
    pub property: Option<String>,
    pub search_text: Option<String>,
}

impl CoincidenceParams {
    pub fn into_query(self, fields: &SearchFields) -> Result<CoincidenceQuery, ApiError> {
        CoincidenceQuery::parse(
            self.property.as_deref(),
            self.search_text.as_deref(),
            fields,
        )
        .map_err(|e| ApiError::from(DomainError::from(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_are_masked() {
        let err = ApiError::from(DomainError::Repository("connection refused".to_string()));

        assert_eq!(
            err,
            ApiError::InternalServerError(MASKED_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_domain_error_status_mapping() {
        assert!(matches!(
            ApiError::from(DomainError::not_found("Role", 3)),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::Validation("bad".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::already_exists("Role", "name 'admin'")),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::NotAuthorized("disabled".to_string())),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn test_coincidence_params_reject_unknown_property() {
        const FIELDS: SearchFields = SearchFields::new(&["name"]);
        let params = CoincidenceParams {
            property: Some("password_hash".to_string()),
            search_text: Some("a".to_string()),
        };

        assert!(matches!(
            params.into_query(&FIELDS),
            Err(ApiError::BadRequest(_))
        ));
    }
}
