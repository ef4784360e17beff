use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access::ports::ResourceScope;
use crate::domain::access::service::ensure_active;
use crate::domain::access::service::AccessScoper;
use crate::domain::agenda::errors::AgendaError;
use crate::domain::agenda::models::Agenda;
use crate::domain::agenda::models::AgendaFilter;
use crate::domain::agenda::models::CreateAgendaCommand;
use crate::domain::agenda::models::UpdateAgendaCommand;
use crate::domain::agenda::ports::AgendaRepository;
use crate::domain::agenda::ports::AgendaServicePort;
use crate::domain::ids::AgendaId;
use crate::domain::user::models::Principal;

/// Domain service implementation for agenda operations.
pub struct AgendaService<AR, S>
where
    AR: AgendaRepository,
    S: ResourceScope<Agenda>,
{
    repository: Arc<AR>,
    scoper: AccessScoper<Agenda, S>,
}

impl<AR, S> AgendaService<AR, S>
where
    AR: AgendaRepository,
    S: ResourceScope<Agenda>,
{
    pub fn new(repository: Arc<AR>, scope: Arc<S>) -> Self {
        Self {
            repository,
            scoper: AccessScoper::new(scope),
        }
    }
}

#[async_trait]
impl<AR, S> AgendaServicePort for AgendaService<AR, S>
where
    AR: AgendaRepository,
    S: ResourceScope<Agenda>,
{
    async fn create_event(
        &self,
        principal: &Principal,
        command: CreateAgendaCommand,
    ) -> Result<Agenda, AgendaError> {
        ensure_active(principal)?;

        let event = self.repository.create(principal, command).await?;

        tracing::info!(
            event_id = %event.id,
            user_id = %principal.user_id,
            "Agenda event created"
        );

        Ok(event)
    }

    async fn get_event(&self, principal: &Principal, id: AgendaId) -> Result<Agenda, AgendaError> {
        Ok(self.scoper.fetch(principal, id).await?)
    }

    async fn list_events(
        &self,
        principal: &Principal,
        filter: AgendaFilter,
    ) -> Result<Vec<Agenda>, AgendaError> {
        let filter = filter.validate()?;
        ensure_active(principal)?;
        self.repository.list(principal, &filter).await
    }

    async fn update_event(
        &self,
        principal: &Principal,
        id: AgendaId,
        command: UpdateAgendaCommand,
    ) -> Result<Agenda, AgendaError> {
        if command.is_empty() {
            return Err(AgendaError::EmptyUpdate);
        }
        ensure_active(principal)?;

        match self.repository.update(principal, id, command).await? {
            Some(event) => Ok(event),
            None => Err(self.scoper.classify_miss(principal, id).await.into()),
        }
    }

    async fn delete_event(&self, principal: &Principal, id: AgendaId) -> Result<(), AgendaError> {
        ensure_active(principal)?;
        if self.repository.delete(principal, id).await? {
            tracing::info!(event_id = %id, user_id = %principal.user_id, "Agenda event deleted");
            Ok(())
        } else {
            Err(self.scoper.classify_miss(principal, id).await.into())
        }
    }
}
