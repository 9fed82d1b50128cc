use thiserror::Error;

use crate::domain::errors::DomainError;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Empty,

    #[error("Password too long: maximum {max} characters")]
    TooLong { max: usize },
}

impl From<UsernameError> for DomainError {
    fn from(err: UsernameError) -> Self {
        DomainError::Validation(format!("Invalid username: {}", err))
    }
}

impl From<EmailError> for DomainError {
    fn from(err: EmailError) -> Self {
        DomainError::Validation(format!("Invalid email: {}", err))
    }
}

impl From<PasswordPolicyError> for DomainError {
    fn from(err: PasswordPolicyError) -> Self {
        DomainError::Validation(err.to_string())
    }
}
