use std::str::FromStr;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::errors::DomainError;
use crate::domain::icd::models::CieVersion;
use crate::domain::icd::models::Code;
use crate::domain::icd::models::CreateIcdCodeCommand;
use crate::domain::icd::models::IcdCode;
use crate::domain::icd::models::IcdCodeId;
use crate::domain::icd::models::UpdateIcdCodeCommand;
use crate::domain::icd::ports::IcdRepository;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::outbound::repositories::errors::database_error;
use crate::outbound::repositories::errors::unexpected_constraint;
use crate::outbound::repositories::errors::write_error;
use crate::outbound::repositories::search;
use crate::outbound::repositories::search::SearchSource;
use crate::outbound::repositories::sparse::SparseUpdate;

const COLUMNS: &str = "id, cie_version, code, description, chapter_no, chapter_title";
const SOURCE: SearchSource<'static> = SearchSource::table("icd_cie");

#[derive(sqlx::FromRow)]
struct IcdRow {
    id: i64,
    cie_version: String,
    code: String,
    description: String,
    chapter_no: String,
    chapter_title: String,
}

impl TryFrom<IcdRow> for IcdCode {
    type Error = DomainError;

    fn try_from(row: IcdRow) -> Result<Self, Self::Error> {
        Ok(IcdCode {
            id: IcdCodeId(row.id),
            cie_version: CieVersion::from_str(&row.cie_version)?,
            code: Code::new(row.code)?,
            description: row.description,
            chapter_no: row.chapter_no,
            chapter_title: row.chapter_title,
        })
    }
}

pub struct PostgresIcdRepository {
    pool: PgPool,
}

impl PostgresIcdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn duplicate_code(code: &str) -> DomainError {
    DomainError::already_exists("ICD code", format!("code '{}'", code))
}

#[async_trait]
impl IcdRepository for PostgresIcdRepository {
    async fn create(&self, command: &CreateIcdCodeCommand) -> Result<IcdCode, DomainError> {
        let row = sqlx::query_as::<_, IcdRow>(&format!(
            r#"
            INSERT INTO icd_cie (cie_version, code, description, chapter_no, chapter_title)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(command.cie_version.as_str())
        .bind(command.code.as_str())
        .bind(&command.description)
        .bind(&command.chapter_no)
        .bind(&command.chapter_title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(
                e,
                |_| duplicate_code(command.code.as_str()),
                unexpected_constraint,
            )
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: IcdCodeId) -> Result<Option<IcdCode>, DomainError> {
        sqlx::query_as::<_, IcdRow>(&format!("SELECT {} FROM icd_cie WHERE id = $1", COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(IcdCode::try_from)
            .transpose()
    }

    async fn find_by_code(&self, code: &Code) -> Result<Option<IcdCode>, DomainError> {
        sqlx::query_as::<_, IcdRow>(&format!("SELECT {} FROM icd_cie WHERE code = $1", COLUMNS))
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(IcdCode::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<IcdCode>, DomainError> {
        sqlx::query_as::<_, IcdRow>(&format!("SELECT {} FROM icd_cie ORDER BY id", COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(IcdCode::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: IcdCodeId,
        command: &UpdateIcdCodeCommand,
    ) -> Result<Option<IcdCode>, DomainError> {
        // icd_cie carries no timestamps, so nothing to touch.
        let mut update = SparseUpdate::new("icd_cie");
        update
            .set("cie_version", command.cie_version.map(|v| v.as_str()))
            .set("code", command.code.as_ref().map(|c| c.as_str().to_string()))
            .set("description", command.description.clone())
            .set("chapter_no", command.chapter_no.clone())
            .set("chapter_title", command.chapter_title.clone());
        if update.is_empty() {
            return self.find_by_id(id).await;
        }

        let updated = update
            .finish(id.0, None)
            .build_query_scalar::<i64>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    |_| duplicate_code(command.code.as_ref().map_or("", Code::as_str)),
                    unexpected_constraint,
                )
            })?;

        match updated {
            Some(_) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: IcdCodeId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM icd_cie WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Page<IcdCode>, DomainError> {
        let (rows, total) = search::search_rows::<IcdRow>(&self.pool, COLUMNS, &SOURCE, query)
            .await
            .map_err(database_error)?;

        let records = rows
            .into_iter()
            .map(IcdCode::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(records, total, query.pagination))
    }

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError> {
        search::coincidences(&self.pool, &SOURCE, query)
            .await
            .map_err(database_error)
    }
}
