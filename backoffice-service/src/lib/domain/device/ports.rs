use async_trait::async_trait;

use crate::domain::device::models::CreateDeviceCommand;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceId;
use crate::domain::device::models::UpdateDeviceCommand;
use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::domain::user::models::UserId;

/// Port for device domain service operations.
#[async_trait]
pub trait DeviceServicePort: Send + Sync + 'static {
    async fn list_devices(&self) -> Result<Vec<Device>, DomainError>;

    /// # Errors
    /// * `NotFound` - User does not exist
    async fn list_user_devices(&self, user_id: UserId) -> Result<Vec<Device>, DomainError>;

    /// # Errors
    /// * `NotFound` - Device does not exist
    async fn get_device(&self, id: DeviceId) -> Result<Device, DomainError>;

    /// # Errors
    /// * `Validation` - Owning user does not exist
    async fn create_device(&self, command: CreateDeviceCommand) -> Result<Device, DomainError>;

    /// # Errors
    /// * `NotFound` - Device does not exist
    async fn update_device(
        &self,
        id: DeviceId,
        command: UpdateDeviceCommand,
    ) -> Result<Device, DomainError>;

    /// # Errors
    /// * `NotFound` - Device does not exist
    async fn delete_device(&self, id: DeviceId) -> Result<(), DomainError>;

    async fn search_devices(&self, query: SearchQuery) -> Result<Page<Device>, DomainError>;

    async fn device_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError>;
}

/// Persistence operations for devices.
#[async_trait]
pub trait DeviceRepository: Send + Sync + 'static {
    async fn create(&self, command: &CreateDeviceCommand) -> Result<Device, DomainError>;

    async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DomainError>;

    async fn list_all(&self) -> Result<Vec<Device>, DomainError>;

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Device>, DomainError>;

    /// Returns `None` when the device does not exist.
    async fn update(
        &self,
        id: DeviceId,
        command: &UpdateDeviceCommand,
    ) -> Result<Option<Device>, DomainError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: DeviceId) -> Result<bool, DomainError>;

    async fn search(&self, query: &SearchQuery) -> Result<Page<Device>, DomainError>;

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
}
