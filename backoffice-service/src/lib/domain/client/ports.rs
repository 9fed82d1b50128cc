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
use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

/// Port for client hierarchy operations.
#[async_trait]
pub trait ClientServicePort: Send + Sync + 'static {
    async fn list_clients(&self) -> Result<Vec<Client>, DomainError>;

    /// # Errors
    /// * `NotFound` - Client does not exist or was deleted
    async fn get_client(&self, id: ClientId) -> Result<Client, DomainError>;

    async fn create_client(&self, command: CreateClientCommand) -> Result<Client, DomainError>;

    /// # Errors
    /// * `NotFound` - Client does not exist or was deleted
    async fn update_client(
        &self,
        id: ClientId,
        command: UpdateClientCommand,
    ) -> Result<Client, DomainError>;

    /// # Errors
    /// * `NotFound` - Client does not exist or was already deleted
    async fn delete_client(&self, id: ClientId) -> Result<(), DomainError>;

    async fn search_clients(&self, query: SearchQuery) -> Result<Page<Client>, DomainError>;

    async fn client_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError>;

    /// # Errors
    /// * `NotFound` - Parent client does not exist or was deleted
    async fn add_sub_client(
        &self,
        client_id: ClientId,
        command: CreateSubClientCommand,
    ) -> Result<SubClient, DomainError>;

    /// # Errors
    /// * `NotFound` - Sub-client does not exist or was already deleted
    async fn delete_sub_client(&self, id: SubClientId) -> Result<(), DomainError>;

    /// # Errors
    /// * `NotFound` - Parent sub-client does not exist or was deleted
    async fn add_program(
        &self,
        sub_client_id: SubClientId,
        command: CreateProgramCommand,
    ) -> Result<Program, DomainError>;

    /// # Errors
    /// * `NotFound` - Program does not exist or was already deleted
    async fn delete_program(&self, id: ProgramId) -> Result<(), DomainError>;
}

/// Persistence operations for the client hierarchy. Reads skip deleted rows.
#[async_trait]
pub trait ClientRepository: Send + Sync + 'static {
    async fn create(&self, command: &CreateClientCommand) -> Result<Client, DomainError>;

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Client>, DomainError>;

    async fn update(
        &self,
        id: ClientId,
        command: &UpdateClientCommand,
    ) -> Result<Option<Client>, DomainError>;

    async fn soft_delete(&self, id: ClientId) -> Result<bool, DomainError>;

    async fn search(&self, query: &SearchQuery) -> Result<Page<Client>, DomainError>;

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;

    async fn create_sub_client(
        &self,
        client_id: ClientId,
        command: &CreateSubClientCommand,
    ) -> Result<SubClient, DomainError>;

    async fn find_sub_client(&self, id: SubClientId) -> Result<Option<SubClient>, DomainError>;

    async fn soft_delete_sub_client(&self, id: SubClientId) -> Result<bool, DomainError>;

    async fn create_program(
        &self,
        sub_client_id: SubClientId,
        command: &CreateProgramCommand,
    ) -> Result<Program, DomainError>;

    async fn soft_delete_program(&self, id: ProgramId) -> Result<bool, DomainError>;
}
