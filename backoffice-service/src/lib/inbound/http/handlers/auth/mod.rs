use serde::Deserialize;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::RefreshedSession;
use crate::domain::session::models::Session;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;

pub mod login;
pub mod refresh_access_token;

pub use login::login;
pub use refresh_access_token::refresh_access_token;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, DomainError> {
        Ok(LoginCommand {
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            user_id: session.user.id.0,
            username: session.user.username.as_str().to_string(),
            first_name: session.user.first_name,
            last_name: session.user.last_name,
            email: session.user.email.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl From<RefreshedSession> for RefreshResponse {
    fn from(session: RefreshedSession) -> Self {
        Self {
            access_token: session.access_token,
            user_id: session.user.id.0,
            username: session.user.username.as_str().to_string(),
            email: session.user.email.as_str().to_string(),
        }
    }
}
