use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::errors::DomainError;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::outbound::repositories::errors::database_error;
use crate::outbound::repositories::errors::write_error;
use crate::outbound::repositories::search;
use crate::outbound::repositories::search::SearchSource;
use crate::outbound::repositories::sparse::SparseUpdate;

// Every read embeds the user's role.
const COLUMNS: &str = "u.id, u.username, u.first_name, u.last_name, u.email, u.password_hash, \
    u.job_position, u.enabled, u.created_at, u.updated_at, \
    r.id AS role_id, r.name AS role_name, r.description AS role_description, \
    r.enabled AS role_enabled, r.created_at AS role_created_at, r.updated_at AS role_updated_at";

const SOURCE: SearchSource<'static> = SearchSource {
    from: "users u JOIN roles r ON r.id = u.role_id",
    qualifier: "u.",
    live: None,
};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    job_position: String,
    enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    role_id: i64,
    role_name: String,
    role_description: String,
    role_enabled: bool,
    role_created_at: DateTime<Utc>,
    role_updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            first_name: row.first_name,
            last_name: row.last_name,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            job_position: row.job_position,
            role: Role {
                id: RoleId(row.role_id),
                name: RoleName::new(row.role_name)?,
                description: row.role_description,
                enabled: row.role_enabled,
                created_at: row.role_created_at,
                updated_at: row.role_updated_at,
            },
            enabled: row.enabled,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, condition: &str, value: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM {} WHERE {} = $1",
            COLUMNS, SOURCE.from, condition
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }
}

fn duplicate(constraint: Option<&str>, username: &str, email: &str) -> DomainError {
    match constraint {
        Some("users_email_key") => DomainError::already_exists("User", format!("email '{}'", email)),
        _ => DomainError::already_exists("User", format!("username '{}'", username)),
    }
}

fn missing_role(role_id: Option<RoleId>) -> DomainError {
    match role_id {
        Some(id) => DomainError::Validation(format!("Role {} does not exist", id)),
        None => DomainError::Validation("Referenced role does not exist".to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, first_name, last_name, email, password_hash, job_position, role_id, enabled)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.job_position)
        .bind(user.role_id.0)
        .bind(user.enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(
                e,
                |constraint| duplicate(constraint, user.username.as_str(), user.email.as_str()),
                |_| missing_role(Some(user.role_id)),
            )
        })?;

        self.find_by_id(UserId(id))
            .await?
            .ok_or_else(|| DomainError::Repository(format!("user {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM {} WHERE u.id = $1",
            COLUMNS, SOURCE.from
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        self.find_where("u.username", username.as_str()).await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError> {
        self.find_where("u.email", email.as_str()).await
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM {} ORDER BY u.id",
            COLUMNS, SOURCE.from
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DomainError> {
        let username = changes.username.as_ref().map(|u| u.as_str().to_string());
        let email = changes.email.as_ref().map(|e| e.as_str().to_string());

        let mut update = SparseUpdate::new("users");
        update
            .set("username", username.clone())
            .set("first_name", changes.first_name)
            .set("last_name", changes.last_name)
            .set("email", email.clone())
            .set("password_hash", changes.password_hash)
            .set("job_position", changes.job_position)
            .set("role_id", changes.role_id.map(|r| r.0))
            .set("enabled", changes.enabled)
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
                    |constraint| {
                        duplicate(
                            constraint,
                            username.as_deref().unwrap_or_default(),
                            email.as_deref().unwrap_or_default(),
                        )
                    },
                    |_| missing_role(changes.role_id),
                )
            })?;

        match updated {
            Some(_) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Page<User>, DomainError> {
        let (rows, total) = search::search_rows::<UserRow>(&self.pool, COLUMNS, &SOURCE, query)
            .await
            .map_err(database_error)?;

        let records = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(records, total, query.pagination))
    }

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError> {
        search::coincidences(&self.pool, &SOURCE, query)
            .await
            .map_err(database_error)
    }
}
