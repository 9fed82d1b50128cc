use crate::domain::errors::DomainError;

/// Generic store failure. The message is logged server-side and masked in responses.
pub(crate) fn database_error(e: sqlx::Error) -> DomainError {
    DomainError::Repository(e.to_string())
}

/// Translate constraint violations raised by a write.
///
/// Pre-checks in the services catch the common case; this covers a concurrent
/// writer winning the race. Both closures receive the violated constraint name.
pub(crate) fn write_error(
    e: sqlx::Error,
    on_unique: impl FnOnce(Option<&str>) -> DomainError,
    on_foreign_key: impl FnOnce(Option<&str>) -> DomainError,
) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
        if db_err.is_foreign_key_violation() {
            return on_foreign_key(db_err.constraint());
        }
    }
    database_error(e)
}

/// Violation of a constraint the caller has no specific meaning for.
pub(crate) fn unexpected_constraint(constraint: Option<&str>) -> DomainError {
    DomainError::Repository(format!(
        "unexpected constraint violation: {}",
        constraint.unwrap_or("unnamed")
    ))
}
