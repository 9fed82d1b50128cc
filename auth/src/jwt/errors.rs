use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token configuration is incomplete: {0} is not set")]
    MissingConfiguration(&'static str),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Unexpected signing algorithm")]
    UnexpectedAlgorithm,

    #[error("Token issuer is not accepted")]
    InvalidIssuer,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}
