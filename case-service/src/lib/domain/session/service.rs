use std::sync::Arc;

use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::ids::UserId;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::user::models::Principal;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Resolves login attempts and session tokens into principals.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Exchange a username and password for a session.
    ///
    /// Only active users of accounts that are not deleted can log in.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, wrong password or malformed username
    /// * `Internal` - Lookup or token issuance failed
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, SessionError> {
        let candidate = match Username::new(username.to_string()) {
            Ok(username) => self
                .repository
                .find_login_candidate(&username)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Login lookup failed");
                    SessionError::Internal(e.to_string())
                })?,
            Err(_) => None,
        };

        let (principal, stored_hash) = match candidate {
            Some(candidate) => (Some(candidate.principal), Some(candidate.password_hash)),
            None => (None, None),
        };

        let subject = principal.as_ref().map_or(0, |p| p.user_id.as_i64());

        let token = self
            .authenticator
            .authenticate(password, stored_hash.as_deref(), subject)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!("Login rejected");
                    SessionError::InvalidCredentials
                }
                AuthenticationError::Token(err) => {
                    tracing::error!(error = %err, "Token issuance failed");
                    SessionError::Internal(err.to_string())
                }
            })?;

        let principal = principal.ok_or(SessionError::InvalidCredentials)?;

        tracing::info!(user_id = %principal.user_id, "Login succeeded");

        Ok(Session { principal, token })
    }

    /// Resolve a session token into the principal it was issued for.
    ///
    /// Returns `None` for invalid or expired tokens and for users that are no
    /// longer active. Lookup failures are logged and also yield `None`.
    pub async fn resolve(&self, token: &str) -> Option<Principal> {
        let subject = self.authenticator.resolve_subject(token)?;
        let user_id = UserId::from_string(&subject).ok()?;

        match self.repository.find_principal(&user_id).await {
            Ok(principal) => principal.filter(|p| p.account_status.permits_access()),
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Principal lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenCodec;
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::AccountStatus;
    use crate::domain::ids::AccountId;
    use crate::domain::ids::RoleId;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::LoginCandidate;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserProfile;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

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

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(TokenCodec::new(SECRET)))
    }

    fn principal(id: i64) -> Principal {
        Principal {
            user_id: UserId(id),
            username: Username::new("jdoe".to_string()).unwrap(),
            account_id: AccountId(1),
            account_status: AccountStatus::Running,
            role_id: RoleId(2),
        }
    }

    #[tokio::test]
    async fn test_login_success_returns_principal_and_token() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("password123").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_login_candidate()
            .withf(|u| u.as_str() == "jdoe")
            .times(1)
            .returning(move |_| {
                Ok(Some(LoginCandidate {
                    principal: principal(5),
                    password_hash: hash.clone(),
                }))
            });

        let service = SessionService::new(Arc::new(repository), authenticator.clone());

        let session = service.login("jdoe", "password123").await.unwrap();
        assert_eq!(session.principal.user_id, UserId(5));
        assert_eq!(
            authenticator.resolve_subject(session.token.as_str()),
            Some("5".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_unknown_user_and_wrong_password_are_indistinguishable() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("password123").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_login_candidate()
            .returning(move |username| {
                if username.as_str() == "jdoe" {
                    Ok(Some(LoginCandidate {
                        principal: principal(5),
                        password_hash: hash.clone(),
                    }))
                } else {
                    Ok(None)
                }
            });

        let service = SessionService::new(Arc::new(repository), authenticator);

        let unknown = service.login("ghost", "password123").await.unwrap_err();
        let wrong = service.login("jdoe", "not-the-password").await.unwrap_err();
        let malformed = service.login("x", "password123").await.unwrap_err();

        assert!(matches!(unknown, SessionError::InvalidCredentials));
        assert!(matches!(wrong, SessionError::InvalidCredentials));
        assert!(matches!(malformed, SessionError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), malformed.to_string());
    }

    #[tokio::test]
    async fn test_login_lookup_failure_is_internal() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_login_candidate()
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let service = SessionService::new(Arc::new(repository), authenticator());

        let result = service.login("jdoe", "password123").await;
        assert!(matches!(result, Err(SessionError::Internal(_))));
    }

    #[tokio::test]
    async fn test_resolve_valid_token() {
        let authenticator = authenticator();
        let token = authenticator.issue_token(5, None).unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_principal()
            .withf(|id| *id == UserId(5))
            .times(1)
            .returning(|_| Ok(Some(principal(5))));

        let service = SessionService::new(Arc::new(repository), authenticator);

        assert_eq!(service.resolve(token.as_str()).await, Some(principal(5)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_bad_tokens_without_lookup() {
        let authenticator = authenticator();
        let foreign = Authenticator::new(TokenCodec::new(b"another_secret_of_sufficient_size!"))
            .issue_token(5, None)
            .unwrap();

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_principal().times(0);

        let service = SessionService::new(Arc::new(repository), authenticator);

        assert_eq!(service.resolve("garbage").await, None);
        assert_eq!(service.resolve(foreign.as_str()).await, None);
    }

    #[tokio::test]
    async fn test_resolve_non_numeric_subject() {
        let authenticator = authenticator();
        let token = authenticator.issue_token("jdoe", None).unwrap();

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_principal().times(0);

        let service = SessionService::new(Arc::new(repository), authenticator);

        assert_eq!(service.resolve(token.as_str()).await, None);
    }

    #[tokio::test]
    async fn test_resolve_inactive_or_deleted_is_anonymous() {
        let authenticator = authenticator();
        let gone = authenticator.issue_token(6, None).unwrap();
        let deleted = authenticator.issue_token(7, None).unwrap();
        let failing = authenticator.issue_token(8, None).unwrap();

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_principal().returning(|id| match id.as_i64() {
            7 => {
                let mut p = principal(7);
                p.account_status = AccountStatus::Deleted;
                Ok(Some(p))
            }
            8 => Err(UserError::DatabaseError("timeout".to_string())),
            _ => Ok(None),
        });

        let service = SessionService::new(Arc::new(repository), authenticator);

        assert_eq!(service.resolve(gone.as_str()).await, None);
        assert_eq!(service.resolve(deleted.as_str()).await, None);
        assert_eq!(service.resolve(failing.as_str()).await, None);
    }
}
