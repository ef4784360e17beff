use std::sync::Arc;

use async_trait::async_trait;
use auth::CredentialHasher;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Principal;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::UserStatus;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Credential hashing implementation
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repository, hasher }
    }

    fn hash(&self, password: &str) -> Result<String, UserError> {
        self.hasher
            .hash(password)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(
        &self,
        principal: &Principal,
        command: RegisterUserCommand,
    ) -> Result<User, UserError> {
        if !principal.account_status.permits_access() {
            return Err(UserError::AccountInactive);
        }

        if !self.repository.role_exists(&command.role_id).await? {
            return Err(UserError::RoleNotFound(command.role_id));
        }

        let password_hash = self.hash(&command.password)?;

        let user = NewUser {
            username: command.username,
            national_id: command.national_id,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            status: UserStatus::Active,
            role_id: command.role_id,
            account_id: principal.account_id,
        };

        let created = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created.id,
            account_id = %created.account_id,
            registered_by = %principal.user_id,
            "User registered"
        );

        Ok(created)
    }

    async fn get_profile(&self, principal: &Principal) -> Result<UserProfile, UserError> {
        self.repository
            .find_profile(&principal.user_id)
            .await?
            .ok_or(UserError::NotFound(principal.user_id))
    }

    async fn change_password(
        &self,
        principal: &Principal,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let user = self
            .repository
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(UserError::NotFound(principal.user_id))?;

        if !self
            .hasher
            .verify(&command.current_password, &user.password_hash)
        {
            return Err(UserError::IncorrectPassword);
        }

        if self.hasher.verify(&command.new_password, &user.password_hash) {
            return Err(UserError::PasswordUnchanged);
        }

        let password_hash = self.hash(&command.new_password)?;
        self.repository
            .update_password_hash(&user.id, password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "Password changed");

        Ok(())
    }

    async fn update_profile(
        &self,
        principal: &Principal,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        if command.is_empty() {
            return Err(UserError::EmptyUpdate);
        }

        let mut user = self
            .repository
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(UserError::NotFound(principal.user_id))?;

        user.apply_profile(command);
        let updated = self.repository.update_profile(&user).await?;

        tracing::info!(user_id = %updated.id, "Profile updated");

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use auth::Argon2Hasher;
    use chrono::Utc;
    use std::sync::Mutex;

    use auth::Authenticator;
    use auth::TokenCodec;
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::AccountStatus;
    use crate::domain::ids::AccountId;
    use crate::domain::ids::RoleId;
    use crate::domain::ids::UserId;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::LoginCandidate;
    use crate::domain::user::models::NationalId;
    use crate::domain::session::service::SessionService;
    use crate::domain::user::models::City;
    use crate::domain::user::models::PersonName;
    use crate::domain::user::models::PhoneNumber;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_login_candidate(&self, username: &Username) -> Result<Option<LoginCandidate>, UserError>;
            async fn find_principal(&self, id: &UserId) -> Result<Option<Principal>, UserError>;
            async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, UserError>;
            async fn update_password_hash(&self, id: &UserId, password_hash: String) -> Result<(), UserError>;
            async fn update_profile(&self, user: &User) -> Result<User, UserError>;
            async fn role_exists(&self, id: &RoleId) -> Result<bool, UserError>;
        }
    }

    fn principal() -> Principal {
        Principal {
            user_id: UserId(1),
            username: Username::new("admin".to_string()).unwrap(),
            account_id: AccountId(10),
            account_status: AccountStatus::Running,
            role_id: RoleId(1),
        }
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand {
            username: Username::new("jdoe".to_string()).unwrap(),
            national_id: NationalId::new("12345678-9".to_string()).unwrap(),
            email: EmailAddress::new("jdoe@firm.example".to_string()).unwrap(),
            first_name: PersonName::new("Jane".to_string()).unwrap(),
            last_name: PersonName::new("Doe".to_string()).unwrap(),
            password: "password123".to_string(),
            role_id: RoleId(2),
        }
    }

    fn stored_user(id: i64, password_hash: String) -> User {
        User {
            id: UserId(id),
            username: Username::new("jdoe".to_string()).unwrap(),
            national_id: NationalId::new("12345678-9".to_string()).unwrap(),
            email: EmailAddress::new("jdoe@firm.example".to_string()).unwrap(),
            first_name: PersonName::new("Jane".to_string()).unwrap(),
            last_name: PersonName::new("Doe".to_string()).unwrap(),
            phone: None,
            city: None,
            password_hash,
            status: UserStatus::Active,
            role_id: RoleId(2),
            account_id: AccountId(10),
            created_at: Utc::now(),
        }
    }

    fn service(repository: MockTestUserRepository) -> UserService<MockTestUserRepository> {
        UserService::new(Arc::new(repository), Arc::new(Argon2Hasher::new()))
    }

    #[tokio::test]
    async fn test_register_user_in_principal_account() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_role_exists()
            .times(1)
            .returning(|_| Ok(true));

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "jdoe"
                    && user.account_id == AccountId(10)
                    && user.status == UserStatus::Active
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: UserId(7),
                    username: user.username,
                    national_id: user.national_id,
                    email: user.email,
                    first_name: user.first_name,
                    last_name: user.last_name,
                    phone: None,
                    city: None,
                    password_hash: user.password_hash,
                    status: user.status,
                    role_id: user.role_id,
                    account_id: user.account_id,
                    created_at: Utc::now(),
                })
            });

        let service = service(repository);

        let user = service
            .register_user(&principal(), register_command())
            .await
            .unwrap();

        assert_eq!(user.id, UserId(7));
        assert_eq!(user.account_id, AccountId(10));
        // Password is hashed with real Argon2
        assert_ne!(user.password_hash, "password123");
    }

    #[tokio::test]
    async fn test_register_user_unknown_role() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_role_exists()
            .times(1)
            .returning(|_| Ok(false));
        repository.expect_create().times(0);

        let service = service(repository);

        let result = service.register_user(&principal(), register_command()).await;
        assert!(matches!(result, Err(UserError::RoleNotFound(RoleId(2)))));
    }

    #[tokio::test]
    async fn test_register_user_duplicate_national_id() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_role_exists().returning(|_| Ok(true));
        repository.expect_create().times(1).returning(|user| {
            Err(UserError::NationalIdAlreadyExists(
                user.national_id.as_str().to_string(),
            ))
        });

        let service = service(repository);

        let result = service.register_user(&principal(), register_command()).await;
        assert!(matches!(result, Err(UserError::NationalIdAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_user_rejected_for_deleted_account() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_role_exists().times(0);
        repository.expect_create().times(0);

        let service = service(repository);

        let mut principal = principal();
        principal.account_status = AccountStatus::Deleted;

        let result = service.register_user(&principal, register_command()).await;
        assert!(matches!(result, Err(UserError::AccountInactive)));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let hasher = Argon2Hasher::new();
        let current_hash = hasher.hash("old_password").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored_user(1, current_hash.clone()))));
        repository
            .expect_update_password_hash()
            .withf(|id, hash| {
                *id == UserId(1) && Argon2Hasher::new().verify("new_password", hash)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(repository);

        let result = service
            .change_password(
                &principal(),
                ChangePasswordCommand {
                    current_password: "old_password".to_string(),
                    new_password: "new_password".to_string(),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let current_hash = Argon2Hasher::new().hash("old_password").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_user(1, current_hash.clone()))));
        repository.expect_update_password_hash().times(0);

        let service = service(repository);

        let result = service
            .change_password(
                &principal(),
                ChangePasswordCommand {
                    current_password: "guess".to_string(),
                    new_password: "new_password".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::IncorrectPassword)));
    }

    #[tokio::test]
    async fn test_change_password_same_as_current() {
        let current_hash = Argon2Hasher::new().hash("old_password").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_user(1, current_hash.clone()))));
        repository.expect_update_password_hash().times(0);

        let service = service(repository);

        let result = service
            .change_password(
                &principal(),
                ChangePasswordCommand {
                    current_password: "old_password".to_string(),
                    new_password: "old_password".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::PasswordUnchanged)));
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_profile()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository);

        let result = service.get_profile(&principal()).await;
        assert!(matches!(result, Err(UserError::NotFound(UserId(1)))));
    }

    #[tokio::test]
    async fn test_registered_user_can_log_in() {
        let stored: Arc<Mutex<Option<User>>> = Arc::new(Mutex::new(None));

        let mut repository = MockTestUserRepository::new();
        repository.expect_role_exists().returning(|_| Ok(true));

        let created = stored.clone();
        repository.expect_create().times(1).returning(move |user| {
            let user = User {
                id: UserId(7),
                username: user.username,
                national_id: user.national_id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                phone: None,
                city: None,
                password_hash: user.password_hash,
                status: user.status,
                role_id: user.role_id,
                account_id: user.account_id,
                created_at: Utc::now(),
            };
            *created.lock().unwrap() = Some(user.clone());
            Ok(user)
        });

        // Mirrors the repository filter: only active users are candidates.
        let lookup = stored.clone();
        repository
            .expect_find_login_candidate()
            .returning(move |username| {
                let stored = lookup.lock().unwrap();
                Ok(stored
                    .as_ref()
                    .filter(|u| u.username == *username && u.status == UserStatus::Active)
                    .map(|u| LoginCandidate {
                        principal: Principal {
                            user_id: u.id,
                            username: u.username.clone(),
                            account_id: u.account_id,
                            account_status: AccountStatus::Running,
                            role_id: u.role_id,
                        },
                        password_hash: u.password_hash.clone(),
                    }))
            });

        let repository = Arc::new(repository);
        let users = UserService::new(repository.clone(), Arc::new(Argon2Hasher::new()));
        let sessions = SessionService::new(
            repository,
            Arc::new(Authenticator::new(TokenCodec::new(
                b"test_secret_key_at_least_32_bytes!",
            ))),
        );

        users
            .register_user(&principal(), register_command())
            .await
            .unwrap();

        let session = sessions.login("jdoe", "password123").await.unwrap();
        assert_eq!(session.principal.user_id, UserId(7));
        assert_eq!(session.principal.account_id, AccountId(10));
    }

    #[tokio::test]
    async fn test_update_profile_merges_fields() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(stored_user(id.as_i64(), "hash".to_string()))));
        repository
            .expect_update_profile()
            .withf(|user| {
                user.email.as_str() == "jane@firm.example"
                    && user.first_name.as_str() == "Jane"
                    && user.phone.as_ref().map(|p| p.as_str()) == Some("+56 9 1234 5678")
                    && user.city.is_none()
            })
            .times(1)
            .returning(|user| Ok(user.clone()));

        let service = service(repository);

        let command = UpdateProfileCommand {
            email: Some(EmailAddress::new("jane@firm.example".to_string()).unwrap()),
            phone: Some(PhoneNumber::new("+56 9 1234 5678".to_string()).unwrap()),
            ..Default::default()
        };

        let user = service.update_profile(&principal(), command).await.unwrap();
        assert_eq!(user.email.as_str(), "jane@firm.example");
        assert_eq!(user.last_name.as_str(), "Doe");
    }

    #[tokio::test]
    async fn test_update_profile_email_taken() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id.as_i64(), "hash".to_string()))));
        repository
            .expect_update_profile()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.as_str().to_string())));

        let service = service(repository);

        let command = UpdateProfileCommand {
            email: Some(EmailAddress::new("taken@firm.example".to_string()).unwrap()),
            city: Some(City::new("Valparaiso".to_string()).unwrap()),
            ..Default::default()
        };

        let result = service.update_profile(&principal(), command).await;
        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_profile_empty_command() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);
        repository.expect_update_profile().times(0);

        let service = service(repository);

        let result = service
            .update_profile(&principal(), UpdateProfileCommand::default())
            .await;
        assert!(matches!(result, Err(UserError::EmptyUpdate)));
    }
}
