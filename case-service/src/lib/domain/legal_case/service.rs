use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::ports::ResourceScope;
use crate::domain::access::service::ensure_active;
use crate::domain::access::service::AccessScoper;
use crate::domain::ids::LegalCaseId;
use crate::domain::legal_case::errors::LegalCaseError;
use crate::domain::legal_case::models::CaseStatus;
use crate::domain::legal_case::models::CreateLegalCaseCommand;
use crate::domain::legal_case::models::LegalCase;
use crate::domain::legal_case::models::UpdateLegalCaseCommand;
use crate::domain::legal_case::ports::LegalCaseRepository;
use crate::domain::legal_case::ports::LegalCaseServicePort;
use crate::domain::user::models::Principal;

/// Domain service implementation for legal case operations.
pub struct LegalCaseService<LR, S>
where
    LR: LegalCaseRepository,
    S: ResourceScope<LegalCase>,
{
    repository: Arc<LR>,
    scoper: AccessScoper<LegalCase, S>,
}

impl<LR, S> LegalCaseService<LR, S>
where
    LR: LegalCaseRepository,
    S: ResourceScope<LegalCase>,
{
    pub fn new(repository: Arc<LR>, scope: Arc<S>) -> Self {
        Self {
            repository,
            scoper: AccessScoper::new(scope),
        }
    }

    async fn scoped_write(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        written: Option<LegalCase>,
    ) -> Result<LegalCase, LegalCaseError> {
        match written {
            Some(case) => Ok(case),
            None => Err(self.scoper.classify_miss(principal, id).await.into()),
        }
    }
}

#[async_trait]
impl<LR, S> LegalCaseServicePort for LegalCaseService<LR, S>
where
    LR: LegalCaseRepository,
    S: ResourceScope<LegalCase>,
{
    async fn create_case(
        &self,
        principal: &Principal,
        command: CreateLegalCaseCommand,
    ) -> Result<LegalCase, LegalCaseError> {
        ensure_active(principal)?;

        let case = self.repository.create(principal, command).await?;

        tracing::info!(
            case_id = %case.id,
            account_id = %case.account_id,
            created_by = %principal.user_id,
            "Legal case created"
        );

        Ok(case)
    }

    async fn get_case(
        &self,
        principal: &Principal,
        id: LegalCaseId,
    ) -> Result<LegalCase, LegalCaseError> {
        Ok(self.scoper.fetch(principal, id).await?)
    }

    async fn list_cases(&self, principal: &Principal) -> Result<Vec<LegalCase>, LegalCaseError> {
        ensure_active(principal)?;
        self.repository.list_for_member(principal).await
    }

    async fn update_notes(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        notes: String,
    ) -> Result<LegalCase, LegalCaseError> {
        ensure_active(principal)?;
        let written = self.repository.update_notes(principal, id, notes).await?;
        self.scoped_write(principal, id, written).await
    }

    async fn update_case(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        command: UpdateLegalCaseCommand,
    ) -> Result<LegalCase, LegalCaseError> {
        if command.is_empty() {
            return Err(LegalCaseError::EmptyUpdate);
        }
        ensure_active(principal)?;
        let written = self.repository.update(principal, id, command).await?;
        self.scoped_write(principal, id, written).await
    }

    async fn update_status(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        status: CaseStatus,
    ) -> Result<LegalCase, LegalCaseError> {
        ensure_active(principal)?;
        let written = self.repository.update_status(principal, id, status).await?;
        self.scoped_write(principal, id, written).await
    }

    async fn delete_case(
        &self,
        principal: &Principal,
        id: LegalCaseId,
    ) -> Result<(), LegalCaseError> {
        ensure_active(principal)?;
        if self.repository.delete(principal, id).await? {
            tracing::info!(case_id = %id, deleted_by = %principal.user_id, "Legal case deleted");
            Ok(())
        } else {
            Err(self.scoper.classify_miss(principal, id).await.into())
        }
    }
}
