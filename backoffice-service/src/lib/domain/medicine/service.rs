use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::medicine::models::CreateMedicineCommand;
use crate::domain::medicine::models::EanCode;
use crate::domain::medicine::models::Medicine;
use crate::domain::medicine::models::MedicineId;
use crate::domain::medicine::models::UpdateMedicineCommand;
use crate::domain::medicine::ports::MedicineRepository;
use crate::domain::medicine::ports::MedicineServicePort;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;

const ENTITY: &str = "Medicine";

pub struct MedicineService<MR>
where
    MR: MedicineRepository,
{
    repository: Arc<MR>,
}

impl<MR> MedicineService<MR>
where
    MR: MedicineRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }

    async fn ensure_ean_code_free(
        &self,
        code: &EanCode,
        owner: Option<MedicineId>,
    ) -> Result<(), DomainError> {
        match self.repository.find_id_by_ean_code(code).await? {
            Some(existing) if Some(existing) != owner => Err(DomainError::already_exists(
                ENTITY,
                format!("EAN code '{}'", code),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<MR> MedicineServicePort for MedicineService<MR>
where
    MR: MedicineRepository,
{
    async fn list_medicines(&self) -> Result<Vec<Medicine>, DomainError> {
        self.repository.list_all().await
    }

    async fn get_medicine(&self, id: MedicineId) -> Result<Medicine, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn create_medicine(
        &self,
        command: CreateMedicineCommand,
    ) -> Result<Medicine, DomainError> {
        self.ensure_ean_code_free(&command.ean_code, None).await?;

        let medicine = self.repository.create(&command).await?;
        tracing::info!(medicine_id = %medicine.id, ean_code = %medicine.ean_code, "Medicine created");

        Ok(medicine)
    }

    async fn update_medicine(
        &self,
        id: MedicineId,
        command: UpdateMedicineCommand,
    ) -> Result<Medicine, DomainError> {
        if command.is_empty() {
            return self.get_medicine(id).await;
        }

        if let Some(code) = &command.ean_code {
            self.ensure_ean_code_free(code, Some(id)).await?;
        }

        self.repository
            .update(id, &command)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn delete_medicine(&self, id: MedicineId) -> Result<(), DomainError> {
        if !self.repository.soft_delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }

        tracing::info!(medicine_id = %id, "Medicine deleted");
        Ok(())
    }

    async fn search_medicines(&self, query: SearchQuery) -> Result<Page<Medicine>, DomainError> {
        self.repository.search(&query).await
    }

    async fn medicine_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError> {
        self.repository.coincidences(&query).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::medicine::models::MedicineType;

    mock! {
        pub TestMedicineRepository {}

        #[async_trait]
        impl MedicineRepository for TestMedicineRepository {
            async fn create(&self, command: &CreateMedicineCommand) -> Result<Medicine, DomainError>;
            async fn find_by_id(&self, id: MedicineId) -> Result<Option<Medicine>, DomainError>;
            async fn find_id_by_ean_code(&self, code: &EanCode) -> Result<Option<MedicineId>, DomainError>;
            async fn list_all(&self) -> Result<Vec<Medicine>, DomainError>;
            async fn update(&self, id: MedicineId, command: &UpdateMedicineCommand) -> Result<Option<Medicine>, DomainError>;
            async fn soft_delete(&self, id: MedicineId) -> Result<bool, DomainError>;
            async fn search(&self, query: &SearchQuery) -> Result<Page<Medicine>, DomainError>;
            async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
        }
    }

    fn command(ean_code: &str) -> CreateMedicineCommand {
        CreateMedicineCommand {
            ean_code: EanCode::new(ean_code.to_string()).unwrap(),
            description: "Paracetamol 500mg".to_string(),
            medicine_type: MedicineType::Tablet,
            laboratory: "Acme".to_string(),
            iva: "0".to_string(),
            sat_key: "51142001".to_string(),
            temperature_control: None,
            active_ingredient: "Paracetamol".to_string(),
            cold_chain: false,
            is_controlled: false,
            unit_quantity: 20.0,
            unit_type: None,
        }
    }

    fn medicine(id: i64, command: &CreateMedicineCommand) -> Medicine {
        Medicine {
            id: MedicineId(id),
            ean_code: command.ean_code.clone(),
            description: command.description.clone(),
            medicine_type: command.medicine_type,
            laboratory: command.laboratory.clone(),
            iva: command.iva.clone(),
            sat_key: command.sat_key.clone(),
            temperature_control: command.temperature_control,
            active_ingredient: command.active_ingredient.clone(),
            cold_chain: command.cold_chain,
            is_controlled: command.is_controlled,
            unit_quantity: command.unit_quantity,
            unit_type: command.unit_type,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_then_duplicate_ean_code() {
        let mut repository = MockTestMedicineRepository::new();

        let mut seq = mockall::Sequence::new();
        repository
            .expect_find_id_by_ean_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|command| Ok(medicine(1, command)));
        repository
            .expect_find_id_by_ean_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(MedicineId(1))));

        let service = MedicineService::new(Arc::new(repository));

        assert!(service.create_medicine(command("7501")).await.is_ok());
        let second = service.create_medicine(command("7501")).await;
        assert!(matches!(second, Err(DomainError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_update_with_own_ean_code() {
        let mut repository = MockTestMedicineRepository::new();

        repository
            .expect_find_id_by_ean_code()
            .times(1)
            .returning(|_| Ok(Some(MedicineId(4))));
        repository
            .expect_update()
            .times(1)
            .returning(|id, _| Ok(Some(medicine(id.0, &command("7501")))));

        let service = MedicineService::new(Arc::new(repository));
        let update = UpdateMedicineCommand {
            ean_code: Some(EanCode::new("7501".to_string()).unwrap()),
            ..Default::default()
        };

        assert!(service.update_medicine(MedicineId(4), update).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let mut repository = MockTestMedicineRepository::new();

        let mut seq = mockall::Sequence::new();
        repository
            .expect_soft_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        repository
            .expect_soft_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let service = MedicineService::new(Arc::new(repository));

        assert!(service.delete_medicine(MedicineId(1)).await.is_ok());
        assert!(matches!(
            service.delete_medicine(MedicineId(1)).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_deleted_medicine_is_not_found() {
        let mut repository = MockTestMedicineRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = MedicineService::new(Arc::new(repository));

        assert!(matches!(
            service.get_medicine(MedicineId(1)).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
