use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::errors::DomainError;
use crate::domain::role::models::CreateRoleCommand;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;
use crate::domain::role::models::UpdateRoleCommand;
use crate::domain::role::ports::RoleRepository;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::outbound::repositories::errors::database_error;
use crate::outbound::repositories::errors::unexpected_constraint;
use crate::outbound::repositories::errors::write_error;
use crate::outbound::repositories::search;
use crate::outbound::repositories::search::SearchSource;
use crate::outbound::repositories::sparse::SparseUpdate;

const COLUMNS: &str = "id, name, description, enabled, created_at, updated_at";
const SOURCE: SearchSource<'static> = SearchSource::table("roles");

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: String,
    enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for Role {
    type Error = DomainError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Role {
            id: RoleId(row.id),
            name: RoleName::new(row.name)?,
            description: row.description,
            enabled: row.enabled,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::already_exists("Role", format!("name '{}'", name))
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create(&self, command: &CreateRoleCommand) -> Result<Role, DomainError> {
        let row = sqlx::query_as::<_, RoleRow>(&format!(
            "INSERT INTO roles (name, description, enabled) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        ))
        .bind(command.name.as_str())
        .bind(&command.description)
        .bind(command.enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(
                e,
                |_| duplicate_name(command.name.as_str()),
                unexpected_constraint,
            )
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DomainError> {
        sqlx::query_as::<_, RoleRow>(&format!("SELECT {} FROM roles WHERE id = $1", COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Role::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, DomainError> {
        sqlx::query_as::<_, RoleRow>(&format!("SELECT {} FROM roles WHERE name = $1", COLUMNS))
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Role::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Role>, DomainError> {
        sqlx::query_as::<_, RoleRow>(&format!("SELECT {} FROM roles ORDER BY id", COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Role::try_from)
            .collect()
    }

    async fn update(
        &self,
        id: RoleId,
        command: &UpdateRoleCommand,
    ) -> Result<Option<Role>, DomainError> {
        let mut update = SparseUpdate::new("roles");
        update
            .set("name", command.name.as_ref().map(|n| n.as_str().to_string()))
            .set("description", command.description.clone())
            .set("enabled", command.enabled)
            .touch();
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
                    |_| duplicate_name(command.name.as_ref().map_or("", RoleName::as_str)),
                    unexpected_constraint,
                )
            })?;

        match updated {
            Some(_) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: RoleId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                write_error(e, unexpected_constraint, |_| {
                    DomainError::Conflict(format!("Role {} is still assigned to users", id))
                })
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Page<Role>, DomainError> {
        let (rows, total) = search::search_rows::<RoleRow>(&self.pool, COLUMNS, &SOURCE, query)
            .await
            .map_err(database_error)?;

        let records = rows
            .into_iter()
            .map(Role::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(records, total, query.pagination))
    }

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError> {
        search::coincidences(&self.pool, &SOURCE, query)
            .await
            .map_err(database_error)
    }
}
