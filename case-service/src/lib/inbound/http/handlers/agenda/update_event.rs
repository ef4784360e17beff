use axum::extract::Path;
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
use crate::domain::agenda::models::EventName;
use crate::domain::agenda::models::UpdateAgendaCommand;
use crate::domain::agenda::ports::AgendaServicePort;
use crate::domain::ids::AgendaId;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventRequest {
    event_name: Option<String>,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    tags: Option<Vec<String>>,
}

impl UpdateEventRequest {
    fn try_into_command(self) -> Result<UpdateAgendaCommand, AgendaError> {
        Ok(UpdateAgendaCommand {
            event_name: self.event_name.map(EventName::new).transpose()?,
            description: self.description.map(validate_description).transpose()?,
            due_date: self.due_date,
            tags: self.tags.map(normalize_tags),
        })
    }
}

pub async fn update_event(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(event_id): Path<String>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<ApiSuccess<AgendaData>, ApiError> {
    let event_id = AgendaId::from_string(&event_id)?;
    let command = body.try_into_command()?;

    state
        .agenda_service
        .update_event(&principal, event_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_rejected() {
        let result = serde_json::from_str::<UpdateEventRequest>(r#"{"owner": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_description_rejected() {
        let body: UpdateEventRequest =
            serde_json::from_str(r#"{"description": "   "}"#).unwrap();
        assert!(matches!(
            body.try_into_command(),
            Err(AgendaError::EmptyDescription)
        ));
    }
}
