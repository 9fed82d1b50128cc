use thiserror::Error;

/// Error type for password operations.
///
/// A password that simply does not match is not an error: `verify` returns
/// `Ok(false)` for that case.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password digest is malformed: {0}")]
    MalformedDigest(String),
}
