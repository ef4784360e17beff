use async_trait::async_trait;

use crate::domain::agenda::errors::AgendaError;
use crate::domain::agenda::models::Agenda;
use crate::domain::agenda::models::AgendaFilter;
use crate::domain::agenda::models::CreateAgendaCommand;
use crate::domain::agenda::models::UpdateAgendaCommand;
use crate::domain::ids::AgendaId;
use crate::domain::user::models::Principal;

/// Port for agenda domain service operations.
#[async_trait]
pub trait AgendaServicePort: Send + Sync + 'static {
    async fn create_event(
        &self,
        principal: &Principal,
        command: CreateAgendaCommand,
    ) -> Result<Agenda, AgendaError>;

    async fn get_event(&self, principal: &Principal, id: AgendaId) -> Result<Agenda, AgendaError>;

    /// The principal's own events matching `filter`, earliest due date first.
    ///
    /// # Errors
    /// * `InvalidDateRange` - `date_from` is after `date_to`
    /// * `DatabaseError` - Database operation failed
    async fn list_events(
        &self,
        principal: &Principal,
        filter: AgendaFilter,
    ) -> Result<Vec<Agenda>, AgendaError>;

    /// Partial update. A given tag list replaces the stored one.
    ///
    /// # Errors
    /// * `EmptyUpdate` - No field given
    /// * `Access` - Event does not exist or belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_event(
        &self,
        principal: &Principal,
        id: AgendaId,
        command: UpdateAgendaCommand,
    ) -> Result<Agenda, AgendaError>;

    async fn delete_event(&self, principal: &Principal, id: AgendaId) -> Result<(), AgendaError>;
}

/// Persistence operations for agenda events.
#[async_trait]
pub trait AgendaRepository: Send + Sync + 'static {
    async fn create(
        &self,
        principal: &Principal,
        command: CreateAgendaCommand,
    ) -> Result<Agenda, AgendaError>;

    async fn list(
        &self,
        principal: &Principal,
        filter: &AgendaFilter,
    ) -> Result<Vec<Agenda>, AgendaError>;

    /// Returns `None` when the event is not owned by the principal.
    async fn update(
        &self,
        principal: &Principal,
        id: AgendaId,
        command: UpdateAgendaCommand,
    ) -> Result<Option<Agenda>, AgendaError>;

    /// Returns `true` when the event was deleted.
    async fn delete(&self, principal: &Principal, id: AgendaId) -> Result<bool, AgendaError>;
}
