use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::medicine::models::CreateMedicineCommand;
use crate::domain::medicine::models::EanCode;
use crate::domain::medicine::models::Medicine;
use crate::domain::medicine::models::MedicineId;
use crate::domain::medicine::models::UpdateMedicineCommand;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

/// Port for medicine catalogue operations.
///
/// Soft-deleted medicines behave as if they did not exist.
#[async_trait]
pub trait MedicineServicePort: Send + Sync + 'static {
    async fn list_medicines(&self) -> Result<Vec<Medicine>, DomainError>;

    /// # Errors
    /// * `NotFound` - Medicine does not exist or was deleted
    async fn get_medicine(&self, id: MedicineId) -> Result<Medicine, DomainError>;

    /// # Errors
    /// * `AlreadyExists` - EAN code is already registered
    async fn create_medicine(
        &self,
        command: CreateMedicineCommand,
    ) -> Result<Medicine, DomainError>;

    /// # Errors
    /// * `NotFound` - Medicine does not exist or was deleted
    /// * `AlreadyExists` - New EAN code is already registered
    async fn update_medicine(
        &self,
        id: MedicineId,
        command: UpdateMedicineCommand,
    ) -> Result<Medicine, DomainError>;

    /// Mark the medicine as deleted.
    ///
    /// # Errors
    /// * `NotFound` - Medicine does not exist or was already deleted
    async fn delete_medicine(&self, id: MedicineId) -> Result<(), DomainError>;

    async fn search_medicines(&self, query: SearchQuery) -> Result<Page<Medicine>, DomainError>;

    async fn medicine_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError>;
}

/// Persistence operations for medicines. Reads skip soft-deleted rows.
#[async_trait]
pub trait MedicineRepository: Send + Sync + 'static {
    async fn create(&self, command: &CreateMedicineCommand) -> Result<Medicine, DomainError>;

    async fn find_by_id(&self, id: MedicineId) -> Result<Option<Medicine>, DomainError>;

    /// Owner of `code` among all rows, deleted ones included.
    async fn find_id_by_ean_code(&self, code: &EanCode)
        -> Result<Option<MedicineId>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Medicine>, DomainError>;

    /// Returns `None` when the medicine does not exist or was deleted.
    async fn update(
        &self,
        id: MedicineId,
        command: &UpdateMedicineCommand,
    ) -> Result<Option<Medicine>, DomainError>;

    /// Returns `false` when no live row was flagged.
    async fn soft_delete(&self, id: MedicineId) -> Result<bool, DomainError>;

    async fn search(&self, query: &SearchQuery) -> Result<Page<Medicine>, DomainError>;

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
}
