use thiserror::Error;

use crate::domain::search::SearchError;

/// Value outside the closed set accepted for an enumerated field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {field} '{value}': allowed values are {}", .allowed.join(", "))]
pub struct InvalidEnumValue {
    pub field: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}

/// Required text field that is blank or too long.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextFieldError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} is too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Top-level error shared by every backoffice operation.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("{entity} already exists: {detail}")]
    AlreadyExists {
        entity: &'static str,
        detail: String,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("{0}")]
    NotAuthenticated(String),

    #[error("{0}")]
    NotAuthorized(String),

    #[error("Token generation failed: {0}")]
    TokenGenerator(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity: &'static str, detail: impl Into<String>) -> Self {
        DomainError::AlreadyExists {
            entity,
            detail: detail.into(),
        }
    }
}

impl From<InvalidEnumValue> for DomainError {
    fn from(err: InvalidEnumValue) -> Self {
        DomainError::Validation(err.to_string())
    }
}

impl From<TextFieldError> for DomainError {
    fn from(err: TextFieldError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

impl From<SearchError> for DomainError {
    fn from(err: SearchError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(err: anyhow::Error) -> Self {
        DomainError::Unknown(err.to_string())
    }
}

/// Trimmed, non-empty text with an upper length bound.
pub fn required_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, TextFieldError> {
    let value = value.trim().to_string();
    let actual = value.chars().count();
    if actual == 0 {
        Err(TextFieldError::Empty { field })
    } else if actual > max {
        Err(TextFieldError::TooLong { field, max, actual })
    } else {
        Ok(value)
    }
}

/// Optional free text with an upper length bound. Blank is allowed.
pub fn bounded_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, TextFieldError> {
    let actual = value.chars().count();
    if actual > max {
        Err(TextFieldError::TooLong { field, max, actual })
    } else {
        Ok(value)
    }
}
