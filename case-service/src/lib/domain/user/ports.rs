use async_trait::async_trait;

use crate::domain::ids::RoleId;
use crate::domain::ids::UserId;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::LoginCandidate;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Principal;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user inside the acting principal's account.
    ///
    /// # Arguments
    /// * `principal` - Authenticated user performing the registration
    /// * `command` - Validated registration data with clear-text password
    ///
    /// # Returns
    /// Created user entity, active and able to log in
    ///
    /// # Errors
    /// * `RoleNotFound` - Referenced role does not exist
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `NationalIdAlreadyExists` - National id is already registered
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register_user(
        &self,
        principal: &Principal,
        command: RegisterUserCommand,
    ) -> Result<User, UserError>;

    /// Retrieve the profile of the acting principal.
    ///
    /// # Errors
    /// * `NotFound` - User vanished since the token was resolved
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, principal: &Principal) -> Result<UserProfile, UserError>;

    /// Replace the principal's password after checking the current one.
    ///
    /// # Errors
    /// * `IncorrectPassword` - Current password does not match
    /// * `PasswordUnchanged` - New password equals the current one
    /// * `NotFound` - User vanished since the token was resolved
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        principal: &Principal,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError>;

    /// Update the principal's own contact details.
    ///
    /// # Returns
    /// User entity after the update
    ///
    /// # Errors
    /// * `EmptyUpdate` - Command carries no field
    /// * `EmailAlreadyExists` - Email belongs to another user
    /// * `NotFound` - User vanished since the token was resolved
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        principal: &Principal,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User row to insert
    ///
    /// # Returns
    /// Created user entity with its assigned identifier
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `NationalIdAlreadyExists` - National id is already registered
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier, regardless of status.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve an active user by login name, together with its digest.
    ///
    /// Users that are inactive or whose account is deleted are not returned.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_login_candidate(
        &self,
        username: &Username,
    ) -> Result<Option<LoginCandidate>, UserError>;

    /// Resolve an identifier to an active principal.
    ///
    /// Same filtering as `find_login_candidate`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_principal(&self, id: &UserId) -> Result<Option<Principal>, UserError>;

    /// Retrieve profile read model.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, UserError>;

    /// Overwrite the stored password digest.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<(), UserError>;

    /// Overwrite the editable contact fields with those of `user`.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email belongs to another user
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(&self, user: &User) -> Result<User, UserError>;

    /// Check that a role exists.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn role_exists(&self, id: &RoleId) -> Result<bool, UserError>;
}
