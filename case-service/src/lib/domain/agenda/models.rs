use chrono::DateTime;
use chrono::Utc;

use crate::domain::access::models::ResourceKind;
use crate::domain::access::models::ScopedResource;
use crate::domain::agenda::errors::AgendaError;
use crate::domain::agenda::errors::EventNameError;
use crate::domain::ids::AccountId;
use crate::domain::ids::AgendaId;
use crate::domain::ids::UserId;

/// Personal agenda event. Visible to its owner only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agenda {
    pub id: AgendaId,
    pub event_name: EventName,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub account_id: AccountId,
    pub user_id: UserId,
}

impl ScopedResource for Agenda {
    type Id = AgendaId;
    const KIND: ResourceKind = ResourceKind::Agenda;
}

impl Agenda {
    /// Merge a partial update. A given tag list replaces the current one.
    pub fn apply(&mut self, command: UpdateAgendaCommand) {
        if let Some(event_name) = command.event_name {
            self.event_name = event_name;
        }
        if let Some(description) = command.description {
            self.description = description;
        }
        if let Some(due_date) = command.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(tags) = command.tags {
            self.tags = tags;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventName(String);

impl EventName {
    const MAX_LENGTH: usize = 40;

    pub fn new(name: String) -> Result<Self, EventNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(EventNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(EventNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-empty event description.
pub fn validate_description(description: String) -> Result<String, AgendaError> {
    if description.trim().is_empty() {
        Err(AgendaError::EmptyDescription)
    } else {
        Ok(description)
    }
}

#[derive(Debug, Clone)]
pub struct CreateAgendaCommand {
    pub event_name: EventName,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateAgendaCommand {
    pub event_name: Option<EventName>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

impl UpdateAgendaCommand {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Listing filter. All criteria are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgendaFilter {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of name or description.
    pub query: Option<String>,
    /// Events must carry every one of these tags.
    pub tags: Vec<String>,
}

impl AgendaFilter {
    /// # Errors
    /// * `InvalidDateRange` - `date_from` is after `date_to`
    pub fn validate(self) -> Result<Self, AgendaError> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) if from > to => Err(AgendaError::InvalidDateRange),
            _ => Ok(self),
        }
    }
}
