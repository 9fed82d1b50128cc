use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::icd::models::Code;
use crate::domain::icd::models::CreateIcdCodeCommand;
use crate::domain::icd::models::IcdCode;
use crate::domain::icd::models::IcdCodeId;
use crate::domain::icd::models::UpdateIcdCodeCommand;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

#[async_trait]
pub trait IcdServicePort: Send + Sync + 'static {
    async fn list_icd_codes(&self) -> Result<Vec<IcdCode>, DomainError>;

    /// # Errors
    /// * `NotFound` - Code does not exist
    async fn get_icd_code(&self, id: IcdCodeId) -> Result<IcdCode, DomainError>;

    /// # Errors
    /// * `AlreadyExists` - Code is already registered
    async fn create_icd_code(&self, command: CreateIcdCodeCommand)
        -> Result<IcdCode, DomainError>;

    /// Uniqueness is re-checked only when the code itself changes.
    ///
    /// # Errors
    /// * `NotFound` - Code does not exist
    /// * `AlreadyExists` - New code is already registered
    async fn update_icd_code(
        &self,
        id: IcdCodeId,
        command: UpdateIcdCodeCommand,
    ) -> Result<IcdCode, DomainError>;

    /// # Errors
    /// * `NotFound` - Code does not exist
    async fn delete_icd_code(&self, id: IcdCodeId) -> Result<(), DomainError>;

    async fn search_icd_codes(&self, query: SearchQuery) -> Result<Page<IcdCode>, DomainError>;

    async fn icd_coincidences(&self, query: CoincidenceQuery)
        -> Result<Vec<String>, DomainError>;
}

#[async_trait]
pub trait IcdRepository: Send + Sync + 'static {
    async fn create(&self, command: &CreateIcdCodeCommand) -> Result<IcdCode, DomainError>;

    async fn find_by_id(&self, id: IcdCodeId) -> Result<Option<IcdCode>, DomainError>;

    async fn find_by_code(&self, code: &Code) -> Result<Option<IcdCode>, DomainError>;

    async fn list_all(&self) -> Result<Vec<IcdCode>, DomainError>;

    async fn update(
        &self,
        id: IcdCodeId,
        command: &UpdateIcdCodeCommand,
    ) -> Result<Option<IcdCode>, DomainError>;

    async fn delete(&self, id: IcdCodeId) -> Result<bool, DomainError>;

    async fn search(&self, query: &SearchQuery) -> Result<Page<IcdCode>, DomainError>;

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
}
