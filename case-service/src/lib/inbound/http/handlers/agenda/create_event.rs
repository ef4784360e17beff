use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::normalize_tags;
use super::AgendaData;
use crate::domain::agenda::errors::AgendaError;
use crate::domain::agenda::models::validate_description;
use crate::domain::agenda::models::CreateAgendaCommand;
use crate::domain::agenda::models::EventName;
use crate::domain::agenda::ports::AgendaServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_event(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateEventRequest>,
) -> Result<ApiSuccess<AgendaData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .agenda_service
        .create_event(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::CREATED, event.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    event_name: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    tags: Vec<String>,
}

impl CreateEventRequest {
    fn try_into_command(self) -> Result<CreateAgendaCommand, AgendaError> {
        Ok(CreateAgendaCommand {
            event_name: EventName::new(self.event_name)?,
            description: validate_description(self.description)?,
            due_date: self.due_date,
            tags: normalize_tags(self.tags),
        })
    }
}
