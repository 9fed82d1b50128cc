use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::errors::DomainError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshedSession;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";
const DISABLED_ACCOUNT: &str = "User account is disabled";

pub struct SessionService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    fn ensure_enabled(user: &User) -> Result<(), DomainError> {
        if user.enabled {
            Ok(())
        } else {
            Err(DomainError::NotAuthorized(DISABLED_ACCOUNT.to_string()))
        }
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, DomainError> {
        let user = self
            .users
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| {
                tracing::debug!(email = %command.email, "Login for unknown email");
                DomainError::NotAuthenticated(INVALID_CREDENTIALS.to_string())
            })?;

        let pair = self
            .authenticator
            .authenticate(command.password.expose(), &user.password_hash, user.id)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    DomainError::NotAuthenticated(INVALID_CREDENTIALS.to_string())
                }
                AuthenticationError::PasswordError(e) => DomainError::Unknown(e.to_string()),
                AuthenticationError::JwtError(e) => DomainError::TokenGenerator(e.to_string()),
            })?;

        Self::ensure_enabled(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(Session {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedSession, DomainError> {
        let refreshed = self
            .authenticator
            .refresh::<UserId>(refresh_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                DomainError::NotAuthenticated(INVALID_REFRESH_TOKEN.to_string())
            })?;

        let user = self
            .users
            .find_by_id(refreshed.subject)
            .await?
            .ok_or_else(|| DomainError::NotAuthenticated(INVALID_REFRESH_TOKEN.to_string()))?;

        Self::ensure_enabled(&user)?;

        Ok(RefreshedSession {
            access_token: refreshed.access_token,
            user,
        })
    }
}
