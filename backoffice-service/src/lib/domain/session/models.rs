use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

/// Result of a successful login: both tokens plus the profile they belong to.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// New access token minted from a refresh token.
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub access_token: String,
    pub user: User,
}
