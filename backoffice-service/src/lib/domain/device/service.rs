use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::device::models::CreateDeviceCommand;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceId;
use crate::domain::device::models::UpdateDeviceCommand;
use crate::domain::device::ports::DeviceRepository;
use crate::domain::device::ports::DeviceServicePort;
use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const ENTITY: &str = "Device";

pub struct DeviceService<DR, UR>
where
    DR: DeviceRepository,
    UR: UserRepository,
{
    repository: Arc<DR>,
    users: Arc<UR>,
}

impl<DR, UR> DeviceService<DR, UR>
where
    DR: DeviceRepository,
    UR: UserRepository,
{
    pub fn new(repository: Arc<DR>, users: Arc<UR>) -> Self {
        Self { repository, users }
    }
}

#[async_trait]
impl<DR, UR> DeviceServicePort for DeviceService<DR, UR>
where
    DR: DeviceRepository,
    UR: UserRepository,
{
    async fn list_devices(&self) -> Result<Vec<Device>, DomainError> {
        self.repository.list_all().await
    }

    async fn list_user_devices(&self, user_id: UserId) -> Result<Vec<Device>, DomainError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }

        self.repository.list_by_user(user_id).await
    }

    async fn get_device(&self, id: DeviceId) -> Result<Device, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn create_device(&self, command: CreateDeviceCommand) -> Result<Device, DomainError> {
        if self.users.find_by_id(command.user_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "User {} does not exist",
                command.user_id
            )));
        }

        let device = self.repository.create(&command).await?;
        tracing::debug!(device_id = %device.id, user_id = %device.user_id, "Device registered");

        Ok(device)
    }

    async fn update_device(
        &self,
        id: DeviceId,
        command: UpdateDeviceCommand,
    ) -> Result<Device, DomainError> {
        if command.is_empty() {
            return self.get_device(id).await;
        }

        self.repository
            .update(id, &command)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn delete_device(&self, id: DeviceId) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        Ok(())
    }

    async fn search_devices(&self, query: SearchQuery) -> Result<Page<Device>, DomainError> {
        self.repository.search(&query).await
    }

    async fn device_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError> {
        self.repository.coincidences(&query).await
    }
}
