use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::CreateProgramCommand;
use crate::domain::client::models::CreateSubClientCommand;
use crate::domain::client::models::Program;
use crate::domain::client::models::ProgramId;
use crate::domain::client::models::SubClient;
use crate::domain::client::models::SubClientId;
use crate::domain::client::models::UpdateClientCommand;
use crate::domain::client::ports::ClientRepository;
use crate::domain::client::ports::ClientServicePort;
use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

const CLIENT: &str = "Client";
const SUB_CLIENT: &str = "Sub-client";
const PROGRAM: &str = "Program";

pub struct ClientService<CR>
where
    CR: ClientRepository,
{
    repository: Arc<CR>,
}

impl<CR> ClientService<CR>
where
    CR: ClientRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ClientServicePort for ClientService<CR>
where
    CR: ClientRepository,
{
    async fn list_clients(&self) -> Result<Vec<Client>, DomainError> {
        self.repository.list_all().await
    }

    async fn get_client(&self, id: ClientId) -> Result<Client, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(CLIENT, id))
    }

    async fn create_client(&self, command: CreateClientCommand) -> Result<Client, DomainError> {
        let client = self.repository.create(&command).await?;
        tracing::info!(client_id = %client.id, alias = %client.profile.alias, "Client created");

        Ok(client)
    }

    async fn update_client(
        &self,
        id: ClientId,
        command: UpdateClientCommand,
    ) -> Result<Client, DomainError> {
        if command.is_empty() {
            return self.get_client(id).await;
        }

        self.repository
            .update(id, &command)
            .await?
            .ok_or(DomainError::not_found(CLIENT, id))
    }

    async fn delete_client(&self, id: ClientId) -> Result<(), DomainError> {
        if !self.repository.soft_delete(id).await? {
            return Err(DomainError::not_found(CLIENT, id));
        }

        tracing::info!(client_id = %id, "Client deleted");
        Ok(())
    }

    async fn search_clients(&self, query: SearchQuery) -> Result<Page<Client>, DomainError> {
        self.repository.search(&query).await
    }

    async fn client_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError> {
        self.repository.coincidences(&query).await
    }

    async fn add_sub_client(
        &self,
        client_id: ClientId,
        command: CreateSubClientCommand,
    ) -> Result<SubClient, DomainError> {
        if self.repository.find_by_id(client_id).await?.is_none() {
            return Err(DomainError::not_found(CLIENT, client_id));
        }

        let sub_client = self
            .repository
            .create_sub_client(client_id, &command)
            .await?;
        tracing::info!(client_id = %client_id, sub_client_id = %sub_client.id, "Sub-client created");

        Ok(sub_client)
    }

    async fn delete_sub_client(&self, id: SubClientId) -> Result<(), DomainError> {
        if !self.repository.soft_delete_sub_client(id).await? {
            return Err(DomainError::not_found(SUB_CLIENT, id));
        }

        tracing::info!(sub_client_id = %id, "Sub-client deleted");
        Ok(())
    }

    async fn add_program(
        &self,
        sub_client_id: SubClientId,
        command: CreateProgramCommand,
    ) -> Result<Program, DomainError> {
        if self
            .repository
            .find_sub_client(sub_client_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found(SUB_CLIENT, sub_client_id));
        }

        let program = self
            .repository
            .create_program(sub_client_id, &command)
            .await?;
        tracing::info!(sub_client_id = %sub_client_id, program_id = %program.id, "Program created");

        Ok(program)
    }

    async fn delete_program(&self, id: ProgramId) -> Result<(), DomainError> {
        if !self.repository.soft_delete_program(id).await? {
            return Err(DomainError::not_found(PROGRAM, id));
        }

        tracing::info!(program_id = %id, "Program deleted");
        Ok(())
    }
}
