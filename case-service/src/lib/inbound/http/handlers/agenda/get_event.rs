use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AgendaData;
use crate::domain::agenda::ports::AgendaServicePort;
use crate::domain::ids::AgendaId;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_event(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(event_id): Path<String>,
) -> Result<ApiSuccess<AgendaData>, ApiError> {
    let event_id = AgendaId::from_string(&event_id)?;

    state
        .agenda_service
        .get_event(&principal, event_id)
        .await
        .map_err(ApiError::from)
        .map(|ref event| ApiSuccess::new(StatusCode::OK, event.into()))
}
