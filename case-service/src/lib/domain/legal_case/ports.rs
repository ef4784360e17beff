use async_trait::async_trait;

use crate::domain::ids::LegalCaseId;
use crate::domain::legal_case::errors::LegalCaseError;
use crate::domain::legal_case::models::CaseStatus;
use crate::domain::legal_case::models::CreateLegalCaseCommand;
use crate::domain::legal_case::models::LegalCase;
use crate::domain::legal_case::models::UpdateLegalCaseCommand;
use crate::domain::user::models::Principal;

/// Port for legal case domain service operations.
///
/// Every operation runs on behalf of a principal and fails with
/// `Access(NotFound)` or `Access(Forbidden)` when the case is outside the
/// principal's scope.
#[async_trait]
pub trait LegalCaseServicePort: Send + Sync + 'static {
    /// Open a case for a client of the principal's account, or for a new
    /// client that is registered and linked in the same transaction.
    ///
    /// # Errors
    /// * `ClientNotFound` - Client is not linked to the principal's account
    /// * `ClientAlreadyExists` - New client's national id or email is taken
    /// * `DatabaseError` - Database operation failed
    async fn create_case(
        &self,
        principal: &Principal,
        command: CreateLegalCaseCommand,
    ) -> Result<LegalCase, LegalCaseError>;

    async fn get_case(
        &self,
        principal: &Principal,
        id: LegalCaseId,
    ) -> Result<LegalCase, LegalCaseError>;

    /// Cases the principal is a member of, newest first.
    async fn list_cases(&self, principal: &Principal) -> Result<Vec<LegalCase>, LegalCaseError>;

    async fn update_notes(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        notes: String,
    ) -> Result<LegalCase, LegalCaseError>;

    /// # Errors
    /// * `EmptyUpdate` - Command carries no field
    /// * `InvalidDateRange` - End date would precede start date
    async fn update_case(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        command: UpdateLegalCaseCommand,
    ) -> Result<LegalCase, LegalCaseError>;

    async fn update_status(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        status: CaseStatus,
    ) -> Result<LegalCase, LegalCaseError>;

    /// # Errors
    /// * `HasFiles` - Files must be removed first
    async fn delete_case(&self, principal: &Principal, id: LegalCaseId)
        -> Result<(), LegalCaseError>;
}

/// Persistence operations for legal case aggregate.
///
/// Mutations re-run the scoped fetch with a row lock inside their own
/// transaction. They return `None` (or `false`) when the case is not visible
/// to the principal, leaving the 404/403 decision to the caller.
#[async_trait]
pub trait LegalCaseRepository: Send + Sync + 'static {
    /// Insert the case and the creator's membership atomically, together
    /// with the client and its account link when the client is new.
    ///
    /// # Errors
    /// * `ClientNotFound` - Client is not linked to the principal's account
    /// * `ClientAlreadyExists` - New client's national id or email is taken
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        principal: &Principal,
        command: CreateLegalCaseCommand,
    ) -> Result<LegalCase, LegalCaseError>;

    async fn list_for_member(&self, principal: &Principal)
        -> Result<Vec<LegalCase>, LegalCaseError>;

    async fn update_notes(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        notes: String,
    ) -> Result<Option<LegalCase>, LegalCaseError>;

    /// # Errors
    /// * `InvalidDateRange` - Merged dates are inconsistent
    /// * `DatabaseError` - Database operation failed
    async fn update(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        command: UpdateLegalCaseCommand,
    ) -> Result<Option<LegalCase>, LegalCaseError>;

    async fn update_status(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        status: CaseStatus,
    ) -> Result<Option<LegalCase>, LegalCaseError>;

    /// Returns `true` when the case was deleted.
    ///
    /// # Errors
    /// * `HasFiles` - Files are still linked to the case
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, principal: &Principal, id: LegalCaseId)
        -> Result<bool, LegalCaseError>;
}
