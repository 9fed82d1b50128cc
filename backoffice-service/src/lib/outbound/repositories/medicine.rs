use std::str::FromStr;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::errors::DomainError;
use crate::domain::medicine::models::CreateMedicineCommand;
use crate::domain::medicine::models::EanCode;
use crate::domain::medicine::models::Medicine;
use crate::domain::medicine::models::MedicineId;
use crate::domain::medicine::models::MedicineType;
use crate::domain::medicine::models::TemperatureControl;
use crate::domain::medicine::models::UnitType;
use crate::domain::medicine::models::UpdateMedicineCommand;
use crate::domain::medicine::ports::MedicineRepository;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::outbound::repositories::errors::database_error;
use crate::outbound::repositories::errors::unexpected_constraint;
use crate::outbound::repositories::errors::write_error;
use crate::outbound::repositories::search;
use crate::outbound::repositories::search::SearchSource;
use crate::outbound::repositories::sparse::SparseUpdate;

const COLUMNS: &str = "id, ean_code, description, medicine_type, laboratory, iva, sat_key, \
    temperature_control, active_ingredient, cold_chain, is_controlled, unit_quantity, \
    unit_type, created_at, updated_at";
const LIVE: &str = "is_deleted = FALSE";
const SOURCE: SearchSource<'static> = SearchSource::table("medicines").live_only(LIVE);

#[derive(sqlx::FromRow)]
struct MedicineRow {
    id: i64,
    ean_code: String,
    description: String,
    medicine_type: String,
    laboratory: String,
    iva: String,
    sat_key: String,
    temperature_control: Option<String>,
    active_ingredient: String,
    cold_chain: bool,
    is_controlled: bool,
    unit_quantity: f64,
    unit_type: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MedicineRow> for Medicine {
    type Error = DomainError;

    fn try_from(row: MedicineRow) -> Result<Self, Self::Error> {
        Ok(Medicine {
            id: MedicineId(row.id),
            ean_code: EanCode::new(row.ean_code)?,
            description: row.description,
            medicine_type: MedicineType::from_str(&row.medicine_type)?,
            laboratory: row.laboratory,
            iva: row.iva,
            sat_key: row.sat_key,
            temperature_control: row
                .temperature_control
                .as_deref()
                .map(TemperatureControl::from_str)
                .transpose()?,
            active_ingredient: row.active_ingredient,
            cold_chain: row.cold_chain,
            is_controlled: row.is_controlled,
            unit_quantity: row.unit_quantity,
            unit_type: row.unit_type.as_deref().map(UnitType::from_str).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresMedicineRepository {
    pool: PgPool,
}

impl PostgresMedicineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn duplicate_ean_code(code: &str) -> DomainError {
    DomainError::already_exists("Medicine", format!("EAN code '{}'", code))
}

#[async_trait]
impl MedicineRepository for PostgresMedicineRepository {
    async fn create(&self, command: &CreateMedicineCommand) -> Result<Medicine, DomainError> {
        let row = sqlx::query_as::<_, MedicineRow>(&format!(
            r#"
            INSERT INTO medicines (
                ean_code, description, medicine_type, laboratory, iva, sat_key,
                temperature_control, active_ingredient, cold_chain, is_controlled,
                unit_quantity, unit_type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(command.ean_code.as_str())
        .bind(&command.description)
        .bind(command.medicine_type.as_str())
        .bind(&command.laboratory)
        .bind(&command.iva)
        .bind(&command.sat_key)
        .bind(command.temperature_control.map(|t| t.as_str()))
        .bind(&command.active_ingredient)
        .bind(command.cold_chain)
        .bind(command.is_controlled)
        .bind(command.unit_quantity)
        .bind(command.unit_type.map(|u| u.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(
                e,
                |_| duplicate_ean_code(command.ean_code.as_str()),
                unexpected_constraint,
            )
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: MedicineId) -> Result<Option<Medicine>, DomainError> {
        sqlx::query_as::<_, MedicineRow>(&format!(
            "SELECT {} FROM medicines WHERE id = $1 AND {}",
            COLUMNS, LIVE
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Medicine::try_from)
        .transpose()
    }

    async fn find_id_by_ean_code(&self, code: &EanCode) -> Result<Option<MedicineId>, DomainError> {
        // Deleted rows still hold their code under the unique constraint.
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM medicines WHERE ean_code = $1")
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(id.map(MedicineId))
    }

    async fn list_all(&self) -> Result<Vec<Medicine>, DomainError> {
        sqlx::query_as::<_, MedicineRow>(&format!(
            "SELECT {} FROM medicines WHERE {} ORDER BY id",
            COLUMNS, LIVE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(Medicine::try_from)
        .collect()
    }

    async fn update(
        &self,
        id: MedicineId,
        command: &UpdateMedicineCommand,
    ) -> Result<Option<Medicine>, DomainError> {
        let mut update = SparseUpdate::new("medicines");
        update
            .set("ean_code", command.ean_code.as_ref().map(|c| c.as_str().to_string()))
            .set("description", command.description.clone())
            .set("medicine_type", command.medicine_type.map(|t| t.as_str()))
            .set("laboratory", command.laboratory.clone())
            .set("iva", command.iva.clone())
            .set("sat_key", command.sat_key.clone())
            .set("temperature_control", command.temperature_control.map(|t| t.as_str()))
            .set("active_ingredient", command.active_ingredient.clone())
            .set("cold_chain", command.cold_chain)
            .set("is_controlled", command.is_controlled)
            .set("unit_quantity", command.unit_quantity)
            .set("unit_type", command.unit_type.map(|u| u.as_str()))
            .touch();
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = update
            .finish(id.0, Some(LIVE))
            .build_query_scalar::<i64>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    |_| {
                        duplicate_ean_code(command.ean_code.as_ref().map_or("", EanCode::as_str))
                    },
                    unexpected_constraint,
                )
            })?;

        match updated {
            Some(_) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn soft_delete(&self, id: MedicineId) -> Result<bool, DomainError> {
        let result = sqlx::query(&format!(
            "UPDATE medicines SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND {}",
            LIVE
        ))
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Page<Medicine>, DomainError> {
        let (rows, total) =
            search::search_rows::<MedicineRow>(&self.pool, COLUMNS, &SOURCE, query)
                .await
                .map_err(database_error)?;

        let records = rows
            .into_iter()
            .map(Medicine::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(records, total, query.pagination))
    }

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError> {
        search::coincidences(&self.pool, &SOURCE, query)
            .await
            .map_err(database_error)
    }
}
