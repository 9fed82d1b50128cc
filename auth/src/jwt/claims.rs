use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claim set carried by every session token.
///
/// Deliberately small: subject, issuer, issue time and expiry. The subject is
/// stored as a string so any identifier type can round-trip through it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identifier of the authenticated principal)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
}

impl Claims {
    /// Build claims for `subject` issued at `issued_at` and valid for `ttl`.
    pub fn new(
        subject: impl ToString,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            iss: issuer.into(),
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
        }
    }

    /// Parse the subject into the caller's identifier type.
    ///
    /// # Errors
    /// * `Malformed` - the subject does not parse as `T`
    pub fn subject_as<T: FromStr>(&self) -> Result<T, JwtError> {
        self.sub
            .parse::<T>()
            .map_err(|_| JwtError::Malformed(format!("unexpected subject '{}'", self.sub)))
    }

    /// Check if the token is expired at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
