use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshedSession;
use crate::domain::session::models::Session;

/// Port for credential exchange.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Exchange email and password for an access/refresh token pair.
    ///
    /// # Errors
    /// * `NotAuthenticated` - Unknown email or wrong password
    /// * `NotAuthorized` - Account is disabled
    /// * `TokenGenerator` - Tokens could not be signed
    async fn login(&self, command: LoginCommand) -> Result<Session, DomainError>;

    /// Mint a new access token from a valid refresh token.
    ///
    /// # Errors
    /// * `NotAuthenticated` - Token is invalid or expired, or its user is gone
    /// * `NotAuthorized` - Account is disabled
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedSession, DomainError>;
}
