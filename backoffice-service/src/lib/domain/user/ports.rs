use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve all users with their role.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Repository` - Database operation failed
    async fn get_user(&self, id: UserId) -> Result<User, DomainError>;

    /// Create new user; the password is hashed before storage.
    ///
    /// # Errors
    /// * `AlreadyExists` - Username or email is already taken
    /// * `Validation` - Referenced role does not exist
    /// * `Repository` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, DomainError>;

    /// Update existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `AlreadyExists` - New username or email is already taken
    /// * `Validation` - Referenced role does not exist
    /// * `Repository` - Database operation failed
    async fn update_user(&self, id: UserId, command: UpdateUserCommand)
        -> Result<User, DomainError>;

    /// Delete existing user together with its devices.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Repository` - Database operation failed
    async fn delete_user(&self, id: UserId) -> Result<(), DomainError>;

    async fn search_users(&self, query: SearchQuery) -> Result<Page<User>, DomainError>;

    async fn user_coincidences(&self, query: CoincidenceQuery)
        -> Result<Vec<String>, DomainError>;
}

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// # Errors
    /// * `AlreadyExists` - Username or email is already taken
    /// * `Validation` - Role does not exist
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError>;

    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Apply the `Some` fields of `changes`. Returns `None` when the user does not exist.
    async fn update(&self, id: UserId, changes: UserChanges)
        -> Result<Option<User>, DomainError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    async fn search(&self, query: &SearchQuery) -> Result<Page<User>, DomainError>;

    async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
}
