use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::role::models::CreateRoleCommand;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::UpdateRoleCommand;
use crate::domain::role::ports::RoleRepository;
use crate::domain::role::ports::RoleServicePort;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

const ENTITY: &str = "Role";

pub struct RoleService<RR>
where
    RR: RoleRepository,
{
    repository: Arc<RR>,
}

impl<RR> RoleService<RR>
where
    RR: RoleRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> RoleServicePort for RoleService<RR>
where
    RR: RoleRepository,
{
    async fn list_roles(&self) -> Result<Vec<Role>, DomainError> {
        self.repository.list_all().await
    }

    async fn get_role(&self, id: RoleId) -> Result<Role, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn create_role(&self, command: CreateRoleCommand) -> Result<Role, DomainError> {
        if self.repository.find_by_name(&command.name).await?.is_some() {
            return Err(DomainError::already_exists(
                ENTITY,
                format!("name '{}'", command.name),
            ));
        }

        let role = self.repository.create(&command).await?;
        tracing::info!(role_id = %role.id, name = %role.name, "Role created");

        Ok(role)
    }

    async fn update_role(
        &self,
        id: RoleId,
        command: UpdateRoleCommand,
    ) -> Result<Role, DomainError> {
        if command.is_empty() {
            return self.get_role(id).await;
        }

        if let Some(name) = &command.name {
            if let Some(existing) = self.repository.find_by_name(name).await? {
                if existing.id != id {
                    return Err(DomainError::already_exists(
                        ENTITY,
                        format!("name '{}'", name),
                    ));
                }
            }
        }

        self.repository
            .update(id, &command)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn delete_role(&self, id: RoleId) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }

        tracing::info!(role_id = %id, "Role deleted");
        Ok(())
    }

    async fn search_roles(&self, query: SearchQuery) -> Result<Page<Role>, DomainError> {
        self.repository.search(&query).await
    }

    async fn role_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError> {
        self.repository.coincidences(&query).await
    }
}
