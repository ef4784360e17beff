use async_trait::async_trait;

use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::ids::AccountId;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::Principal;

/// Port for client domain service operations.
#[async_trait]
pub trait ClientServicePort: Send + Sync + 'static {
    /// Look up a client of the principal's account by national id.
    ///
    /// Clients that exist but are linked only to other accounts are
    /// reported as not found.
    ///
    /// # Errors
    /// * `NotFound` - No client with that national id in the account
    /// * `Access(AccountInactive)` - Principal's account is deleted
    /// * `DatabaseError` - Database operation failed
    async fn get_client_by_national_id(
        &self,
        principal: &Principal,
        national_id: &NationalId,
    ) -> Result<Client, ClientError>;
}

/// Persistence operations for clients.
#[async_trait]
pub trait ClientRepository: Send + Sync + 'static {
    /// Retrieve a client linked to `account_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_national_id(
        &self,
        account_id: AccountId,
        national_id: &NationalId,
    ) -> Result<Option<Client>, ClientError>;
}
