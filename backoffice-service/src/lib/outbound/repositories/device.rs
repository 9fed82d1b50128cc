use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::device::models::CreateDeviceCommand;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceDetails;
use crate::domain::device::models::DeviceId;
use crate::domain::device::models::UpdateDeviceCommand;
use crate::domain::device::ports::DeviceRepository;
use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::domain::user::models::UserId;
use crate::outbound::repositories::errors::database_error;
use crate::outbound::repositories::errors::unexpected_constraint;
use crate::outbound::repositories::errors::write_error;
use crate::outbound::repositories::search;
use crate::outbound::repositories::search::SearchSource;
use crate::outbound::repositories::sparse::SparseUpdate;

const COLUMNS: &str = "id, user_id, ip_address, user_agent, device_type, browser, \
    browser_version, os, language, created_at, updated_at";
const SOURCE: SearchSource<'static> = SearchSource::table("devices");

#[derive(sqlx::FromRow)]
struct DeviceRow {
    id: i64,
    user_id: i64,
    ip_address: String,
    user_agent: String,
    device_type: String,
    browser: String,
    browser_version: String,
    os: String,
    language: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Device {
            id: DeviceId(row.id),
            user_id: UserId(row.user_id),
            details: DeviceDetails {
                ip_address: row.ip_address,
                user_agent: row.user_agent,
                device_type: row.device_type,
                browser: row.browser,
                browser_version: row.browser_version,
                os: row.os,
                language: row.language,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PostgresDeviceRepository {
    pool: PgPool,
}

impl PostgresDeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceRepository for PostgresDeviceRepository {
    async fn create(&self, command: &CreateDeviceCommand) -> Result<Device, DomainError> {
        let details = &command.details;

        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            r#"
            INSERT INTO devices (user_id, ip_address, user_agent, device_type, browser, browser_version, os, language)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(command.user_id.0)
        .bind(&details.ip_address)
        .bind(&details.user_agent)
        .bind(&details.device_type)
        .bind(&details.browser)
        .bind(&details.browser_version)
        .bind(&details.os)
        .bind(&details.language)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(e, unexpected_constraint, |_| {
                DomainError::Validation(format!("User {} does not exist", command.user_id))
            })
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DomainError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {} FROM devices WHERE id = $1",
            COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Device::from))
    }

    async fn list_all(&self) -> Result<Vec<Device>, DomainError> {
        let rows = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {} FROM devices ORDER BY id",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Device::from).collect())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Device>, DomainError> {
        let rows = sqlx::query_as::<_, DeviceRow>(&format!(
            "SELECT {} FROM devices WHERE user_id = $1 ORDER BY id",
            COLUMNS
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Device::from).collect())
    }

    async fn update(
        &self,
        id: DeviceId,
        command: &UpdateDeviceCommand,
    ) -> Result<Option<Device>, DomainError> {
        let mut update = SparseUpdate::new("devices");
        update
            .set("ip_address", command.ip_address.clone())
            .set("user_agent", command.user_agent.clone())
            .set("device_type", command.device_type.clone())
            .set("browser", command.browser.clone())
            .set("browser_version", command.browser_version.clone())
            .set("os", command.os.clone())
            .set("language", command.language.clone())
            .touch();
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = update
            .finish(id.0, None)
            .build_query_scalar::<i64>()
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        match updated {
            Some(_) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: DeviceId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Page<Device>, DomainError> {
        let (rows, total) = search::search_rows::<DeviceRow>(&self.pool, COLUMNS, &SOURCE, query)
            .await
            .map_err(database_error)?;

        Ok(Page::new(rows, total, query.pagination).map(Device::from))
    }

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError> {
        search::coincidences(&self.pool, &SOURCE, query)
            .await
            .map_err(database_error)
    }
}
