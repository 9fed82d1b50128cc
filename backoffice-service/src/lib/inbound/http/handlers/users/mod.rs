use serde::Deserialize;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::role::models::RoleId;
use crate::domain::user::models::profile_text;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::roles::RoleResponse;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod search_users;
pub mod update_user;
pub mod user_coincidences;

pub use create_user::create_user;
pub use delete_user::delete_user;
pub use get_user::get_user;
pub use list_users::list_users;
pub use search_users::search_users;
pub use update_user::update_user;
pub use user_coincidences::user_coincidences;

/// HTTP request body for creating a user (raw JSON)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub job_position: String,
    pub role_id: i64,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, DomainError> {
        Ok(CreateUserCommand {
            username: Username::new(self.username)?,
            first_name: profile_text("firstName", self.first_name)?,
            last_name: profile_text("lastName", self.last_name)?,
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            job_position: profile_text("jobPosition", self.job_position)?,
            role_id: RoleId(self.role_id),
            enabled: self.enabled,
        })
    }
}

/// HTTP request body for updating a user; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub job_position: Option<String>,
    pub role_id: Option<i64>,
    pub enabled: Option<bool>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, DomainError> {
        Ok(UpdateUserCommand {
            username: self.username.map(Username::new).transpose()?,
            first_name: self
                .first_name
                .map(|v| profile_text("firstName", v))
                .transpose()?,
            last_name: self
                .last_name
                .map(|v| profile_text("lastName", v))
                .transpose()?,
            email: self.email.map(EmailAddress::new).transpose()?,
            password: self.password.map(Password::new).transpose()?,
            job_position: self
                .job_position
                .map(|v| profile_text("jobPosition", v))
                .transpose()?,
            role_id: self.role_id.map(RoleId),
            enabled: self.enabled,
        })
    }
}

/// Response body for user operations. The password hash is never serialized.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_position: String,
    pub role_id: i64,
    pub role: RoleResponse,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email.as_str().to_string(),
            job_position: user.job_position,
            role_id: user.role.id.0,
            role: user.role.into(),
            enabled: user.enabled,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}
