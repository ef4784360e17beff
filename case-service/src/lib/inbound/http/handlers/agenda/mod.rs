pub mod create_event;
pub mod delete_event;
pub mod get_event;
pub mod list_events;
pub mod update_event;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

pub use create_event::create_event;
pub use delete_event::delete_event;
pub use get_event::get_event;
pub use list_events::list_events;
pub use update_event::update_event;

use crate::domain::agenda::models::Agenda;
use crate::domain::ids::AgendaId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaData {
    pub id: AgendaId,
    pub event_name: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl From<&Agenda> for AgendaData {
    fn from(event: &Agenda) -> Self {
        Self {
            id: event.id,
            event_name: event.event_name.as_str().to_string(),
            description: event.description.clone(),
            due_date: event.due_date,
            tags: event.tags.clone(),
        }
    }
}

/// Trim tags and drop blanks and duplicates, keeping first occurrence order.
fn normalize_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
