use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::icd::models::CreateIcdCodeCommand;
use crate::domain::icd::models::IcdCode;
use crate::domain::icd::models::IcdCodeId;
use crate::domain::icd::models::UpdateIcdCodeCommand;
use crate::domain::icd::ports::IcdRepository;
use crate::domain::icd::ports::IcdServicePort;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

const ENTITY: &str = "ICD code";

pub struct IcdService<IR>
where
    IR: IcdRepository,
{
    repository: Arc<IR>,
}

impl<IR> IcdService<IR>
where
    IR: IcdRepository,
{
    pub fn new(repository: Arc<IR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<IR> IcdServicePort for IcdService<IR>
where
    IR: IcdRepository,
{
    async fn list_icd_codes(&self) -> Result<Vec<IcdCode>, DomainError> {
        self.repository.list_all().await
    }

    async fn get_icd_code(&self, id: IcdCodeId) -> Result<IcdCode, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn create_icd_code(
        &self,
        command: CreateIcdCodeCommand,
    ) -> Result<IcdCode, DomainError> {
        if self.repository.find_by_code(&command.code).await?.is_some() {
            return Err(DomainError::already_exists(
                ENTITY,
                format!("code '{}'", command.code),
            ));
        }

        self.repository.create(&command).await
    }

    async fn update_icd_code(
        &self,
        id: IcdCodeId,
        command: UpdateIcdCodeCommand,
    ) -> Result<IcdCode, DomainError> {
        let current = self.get_icd_code(id).await?;
        if command.is_empty() {
            return Ok(current);
        }

        if let Some(code) = &command.code {
            if *code != current.code && self.repository.find_by_code(code).await?.is_some() {
                return Err(DomainError::already_exists(
                    ENTITY,
                    format!("code '{}'", code),
                ));
            }
        }

        self.repository
            .update(id, &command)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn delete_icd_code(&self, id: IcdCodeId) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }
        Ok(())
    }

    async fn search_icd_codes(&self, query: SearchQuery) -> Result<Page<IcdCode>, DomainError> {
        self.repository.search(&query).await
    }

    async fn icd_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError> {
        self.repository.coincidences(&query).await
    }
}
