use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::role::models::CreateRoleCommand;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;
use crate::domain::role::models::UpdateRoleCommand;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

/// Port for role domain service operations.
#[async_trait]
pub trait RoleServicePort: Send + Sync + 'static {
    async fn list_roles(&self) -> Result<Vec<Role>, DomainError>;

    /// # Errors
    /// * `NotFound` - Role does not exist
    async fn get_role(&self, id: RoleId) -> Result<Role, DomainError>;

    /// # Errors
    /// * `AlreadyExists` - Name is already taken
    async fn create_role(&self, command: CreateRoleCommand) -> Result<Role, DomainError>;

    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `AlreadyExists` - New name is already taken
    async fn update_role(&self, id: RoleId, command: UpdateRoleCommand)
        -> Result<Role, DomainError>;

    /// # Errors
    /// * `NotFound` - Role does not exist
    /// * `Conflict` - Role is still assigned to users
    async fn delete_role(&self, id: RoleId) -> Result<(), DomainError>;

    async fn search_roles(&self, query: SearchQuery) -> Result<Page<Role>, DomainError>;

    async fn role_coincidences(&self, query: CoincidenceQuery)
        -> Result<Vec<String>, DomainError>;
}

/// Persistence operations for roles.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    async fn create(&self, command: &CreateRoleCommand) -> Result<Role, DomainError>;

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DomainError>;

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Role>, DomainError>;

    /// Apply the `Some` fields of `command`. Returns `None` when the role does not exist.
    async fn update(
        &self,
        id: RoleId,
        command: &UpdateRoleCommand,
    ) -> Result<Option<Role>, DomainError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: RoleId) -> Result<bool, DomainError>;

    async fn search(&self, query: &SearchQuery) -> Result<Page<Role>, DomainError>;

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
}
