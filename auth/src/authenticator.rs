use std::fmt::Display;
use std::str::FromStr;

use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenKind;
use crate::jwt::TokenSettings;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session tokens.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Tokens handed out after a successful login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// A fresh access token minted from a refresh token.
#[derive(Debug, Clone)]
pub struct RefreshedAccess<S> {
    pub access_token: String,
    pub subject: S,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// # Errors
    /// * `JwtError::MissingConfiguration` - issuer or a secret is empty
    pub fn new(settings: TokenSettings) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(settings)?,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access/refresh pair for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest could not be read
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl Display,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(stored_hash, password)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let subject = subject.to_string();
        Ok(TokenPair {
            access_token: self.token_issuer.issue(&subject, TokenKind::Access)?,
            refresh_token: self.token_issuer.issue(&subject, TokenKind::Refresh)?,
        })
    }

    /// Validate a refresh token and mint a new access token for its subject.
    ///
    /// The refresh token itself is not rotated.
    pub fn refresh<S: FromStr + Display>(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshedAccess<S>, JwtError> {
        let claims = self.token_issuer.validate(refresh_token, TokenKind::Refresh)?;
        let subject = claims.subject_as::<S>()?;
        let access_token = self.token_issuer.issue(&subject, TokenKind::Access)?;

        Ok(RefreshedAccess {
            access_token,
            subject,
        })
    }

    /// Validate an access token and return its subject.
    pub fn validate_access<S: FromStr>(&self, token: &str) -> Result<S, JwtError> {
        self.token_issuer
            .validate(token, TokenKind::Access)?
            .subject_as::<S>()
    }
}
