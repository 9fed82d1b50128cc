use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::role::models::RoleId;
use crate::domain::role::ports::RoleRepository;
use crate::domain::search::CoincidenceQuery;
use crate::domain::search::Page;
use crate::domain::search::SearchQuery;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

const ENTITY: &str = "User";

/// Domain service implementation for user operations.
pub struct UserService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    repository: Arc<UR>,
    roles: Arc<RR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, RR> UserService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    pub fn new(repository: Arc<UR>, roles: Arc<RR>) -> Self {
        Self {
            repository,
            roles,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash(&self, password: &Password) -> Result<String, DomainError> {
        self.password_hasher
            .hash(password.expose())
            .map_err(|e| DomainError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn ensure_role_exists(&self, role_id: RoleId) -> Result<(), DomainError> {
        match self.roles.find_by_id(role_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!(
                "Role {} does not exist",
                role_id
            ))),
        }
    }

    async fn ensure_username_free(
        &self,
        username: &Username,
        owner: Option<UserId>,
    ) -> Result<(), DomainError> {
        match self.repository.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => Err(DomainError::already_exists(
                ENTITY,
                format!("username '{}'", username),
            )),
            _ => Ok(()),
        }
    }

    async fn ensure_email_free(
        &self,
        email: &EmailAddress,
        owner: Option<UserId>,
    ) -> Result<(), DomainError> {
        match self.repository.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(DomainError::already_exists(
                ENTITY,
                format!("email '{}'", email),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<UR, RR> UserServicePort for UserService<UR, RR>
where
    UR: UserRepository,
    RR: RoleRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<User, DomainError> {
        self.ensure_username_free(&command.username, None).await?;
        self.ensure_email_free(&command.email, None).await?;
        self.ensure_role_exists(command.role_id).await?;

        let password_hash = self.hash(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                first_name: command.first_name,
                last_name: command.last_name,
                email: command.email,
                password_hash,
                job_position: command.job_position,
                role_id: command.role_id,
                enabled: command.enabled,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, DomainError> {
        if command.is_empty() {
            return self.get_user(id).await;
        }

        if let Some(username) = &command.username {
            self.ensure_username_free(username, Some(id)).await?;
        }
        if let Some(email) = &command.email {
            self.ensure_email_free(email, Some(id)).await?;
        }
        if let Some(role_id) = command.role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let password_hash = command
            .password
            .as_ref()
            .map(|password| self.hash(password))
            .transpose()?;

        let changes = UserChanges {
            username: command.username,
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            job_position: command.job_position,
            role_id: command.role_id,
            enabled: command.enabled,
        };

        self.repository
            .update(id, changes)
            .await?
            .ok_or(DomainError::not_found(ENTITY, id))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), DomainError> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(ENTITY, id));
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn search_users(&self, query: SearchQuery) -> Result<Page<User>, DomainError> {
        self.repository.search(&query).await
    }

    async fn user_coincidences(
        &self,
        query: CoincidenceQuery,
    ) -> Result<Vec<String>, DomainError> {
        self.repository.coincidences(&query).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::role::models::CreateRoleCommand;
    use crate::domain::role::models::Role;
    use crate::domain::role::models::RoleName;
    use crate::domain::role::models::UpdateRoleCommand;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, DomainError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError>;
            async fn list_all(&self) -> Result<Vec<User>, DomainError>;
            async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DomainError>;
            async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
            async fn search(&self, query: &SearchQuery) -> Result<Page<User>, DomainError>;
            async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
        }
    }

    mock! {
        pub TestRoleRepository {}

        #[async_trait]
        impl RoleRepository for TestRoleRepository {
            async fn create(&self, command: &CreateRoleCommand) -> Result<Role, DomainError>;
            async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DomainError>;
            async fn find_by_name(&self, name: &RoleName) -> Result<Option<Role>, DomainError>;
            async fn list_all(&self) -> Result<Vec<Role>, DomainError>;
            async fn update(&self, id: RoleId, command: &UpdateRoleCommand) -> Result<Option<Role>, DomainError>;
            async fn delete(&self, id: RoleId) -> Result<bool, DomainError>;
            async fn search(&self, query: &SearchQuery) -> Result<Page<Role>, DomainError>;
            async fn coincidences(&self, query: &CoincidenceQuery) -> Result<Vec<String>, DomainError>;
        }
    }

    pub(crate) fn sample_role() -> Role {
        Role {
            id: RoleId(1),
            name: RoleName::new("admin".to_string()).unwrap(),
            description: String::new(),
            enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn sample_user(id: i64, username: &str, email: &str) -> User {
        User {
            id: UserId(id),
            username: Username::new(username.to_string()).unwrap(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            job_position: "Pharmacist".to_string(),
            role: sample_role(),
            enabled: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_command() -> CreateUserCommand {
        CreateUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: Password::new("pass123".to_string()).unwrap(),
            job_position: "Pharmacist".to_string(),
            role_id: RoleId(1),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();
        let mut roles = MockTestRoleRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        roles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(sample_role())));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| {
                let mut created = sample_user(5, user.username.as_str(), user.email.as_str());
                created.password_hash = user.password_hash;
                Ok(created)
            });

        let service = UserService::new(Arc::new(repository), Arc::new(roles));

        let user = service.create_user(create_command()).await.unwrap();
        assert_eq!(user.id, UserId(5));
        // Password is hashed with real Argon2
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        let roles = MockTestRoleRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(sample_user(1, "other", "test@example.com"))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(roles));

        let result = service.create_user(create_command()).await;
        assert!(matches!(
            result,
            Err(DomainError::AlreadyExists { entity: "User", .. })
        ));
    }

    #[tokio::test]
    async fn test_create_user_unknown_role() {
        let mut repository = MockTestUserRepository::new();
        let mut roles = MockTestRoleRepository::new();

        repository
            .expect_find_by_username()
            .returning(|_| Ok(None));
        repository.expect_find_by_email().returning(|_| Ok(None));
        roles.expect_find_by_id().times(1).returning(|_| Ok(None));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(roles));

        let result = service.create_user(create_command()).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Arc::new(MockTestRoleRepository::new()));

        let result = service.get_user(UserId(404)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_user_only_sends_given_fields() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_update()
            .withf(|id, changes| {
                *id == UserId(5)
                    && changes.job_position.as_deref() == Some("Chemist")
                    && changes.username.is_none()
                    && changes.email.is_none()
                    && changes.password_hash.is_none()
                    && changes.enabled.is_none()
            })
            .times(1)
            .returning(|id, changes| {
                let mut user = sample_user(id.0, "testuser", "test@example.com");
                user.job_position = changes.job_position.unwrap_or_default();
                Ok(Some(user))
            });

        let service = UserService::new(Arc::new(repository), Arc::new(MockTestRoleRepository::new()));
        let command = UpdateUserCommand {
            job_position: Some("Chemist".to_string()),
            ..Default::default()
        };

        let user = service.update_user(UserId(5), command).await.unwrap();
        assert_eq!(user.job_position, "Chemist");
    }

    #[tokio::test]
    async fn test_update_user_hashes_new_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_update()
            .withf(|_, changes| {
                changes
                    .password_hash
                    .as_deref()
                    .is_some_and(|hash| hash.starts_with("$argon2"))
            })
            .times(1)
            .returning(|id, _| Ok(Some(sample_user(id.0, "testuser", "test@example.com"))));

        let service = UserService::new(Arc::new(repository), Arc::new(MockTestRoleRepository::new()));
        let command = UpdateUserCommand {
            password: Some(Password::new("new-secret".to_string()).unwrap()),
            ..Default::default()
        };

        assert!(service.update_user(UserId(5), command).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_username_taken() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(sample_user(9, "taken", "other@example.com"))));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(MockTestRoleRepository::new()));
        let command = UpdateUserCommand {
            username: Some(Username::new("taken".to_string()).unwrap()),
            ..Default::default()
        };

        let result = service.update_user(UserId(5), command).await;
        assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_delete().times(1).returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repository), Arc::new(MockTestRoleRepository::new()));

        let result = service.delete_user(UserId(5)).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
