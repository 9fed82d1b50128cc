use auth::Authenticator;
use sqlx::PgPool;

use crate::config::BootstrapConfig;
use crate::domain::errors::DomainError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::outbound::repositories::errors::database_error;

const ADMIN_ROLE: &str = "admin";
const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Email or password not configured.
    Skipped,
    /// The configured email already belongs to an account.
    AlreadySeeded,
    /// The `admin` username is held by an account with another email, so the
    /// configured email has no account.
    UsernameTaken,
    Created,
}

/// Seed the `admin` role and the initial account in one transaction.
///
/// Safe to run on every start: the role is upserted and the user insert is a
/// no-op once an account with the same username or email exists. A skip caused
/// by the username alone is reported as `UsernameTaken` and logged at warn.
pub async fn seed_initial_user(
    pool: &PgPool,
    authenticator: &Authenticator,
    config: &BootstrapConfig,
) -> Result<BootstrapOutcome, DomainError> {
    let (Some(email), Some(password)) = (config.email.clone(), config.password.clone()) else {
        tracing::warn!("Bootstrap email or password not configured, skipping initial user");
        return Ok(BootstrapOutcome::Skipped);
    };

    let email = EmailAddress::new(email)?;
    let password = Password::new(password)?;
    let password_hash = authenticator
        .hash_password(password.expose())
        .map_err(|e| DomainError::Unknown(e.to_string()))?;

    let mut tx = pool.begin().await.map_err(database_error)?;

    let role_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO roles (name, description)
        VALUES ($1, 'Full access to the backoffice')
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(ADMIN_ROLE)
    .fetch_one(&mut *tx)
    .await
    .map_err(database_error)?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO users (username, first_name, last_name, email, password_hash, job_position, role_id)
        VALUES ($1, 'Admin', '', $2, $3, 'Administrator', $4)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(ADMIN_USERNAME)
    .bind(email.as_str())
    .bind(&password_hash)
    .bind(role_id)
    .execute(&mut *tx)
    .await
    .map_err(database_error)?
    .rows_affected();

    let outcome = if inserted > 0 {
        tracing::info!(email = %email, role_id, "Initial user created");
        BootstrapOutcome::Created
    } else {
        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(database_error)?;

        if email_taken {
            tracing::info!(email = %email, "Initial user already present");
            BootstrapOutcome::AlreadySeeded
        } else {
            tracing::warn!(
                email = %email,
                username = ADMIN_USERNAME,
                constraint = "users_username_key",
                "Initial user skipped: username belongs to an account with another email"
            );
            BootstrapOutcome::UsernameTaken
        }
    };

    tx.commit().await.map_err(database_error)?;

    Ok(outcome)
}
