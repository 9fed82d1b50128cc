use serde::Deserialize;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::role::models::role_description;
use crate::domain::role::models::CreateRoleCommand;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleName;
use crate::domain::role::models::UpdateRoleCommand;

pub mod create_role;
pub mod delete_role;
pub mod get_role;
pub mod list_roles;
pub mod role_coincidences;
pub mod search_roles;
pub mod update_role;

pub use create_role::create_role;
pub use delete_role::delete_role;
pub use get_role::get_role;
pub use list_roles::list_roles;
pub use role_coincidences::role_coincidences;
pub use search_roles::search_roles;
pub use update_role::update_role;

#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl CreateRoleRequest {
    fn try_into_command(self) -> Result<CreateRoleCommand, DomainError> {
        Ok(CreateRoleCommand {
            name: RoleName::new(self.name)?,
            description: role_description(self.description)?,
            enabled: self.enabled,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

impl UpdateRoleRequest {
    fn try_into_command(self) -> Result<UpdateRoleCommand, DomainError> {
        Ok(UpdateRoleCommand {
            name: self.name.map(RoleName::new).transpose()?,
            description: self.description.map(role_description).transpose()?,
            enabled: self.enabled,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id.0,
            name: role.name.as_str().to_string(),
            description: role.description,
            enabled: role.enabled,
            created_at: role.created_at.to_rfc3339(),
            updated_at: role.updated_at.to_rfc3339(),
        }
    }
}
