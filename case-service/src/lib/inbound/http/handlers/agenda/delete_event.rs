use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::agenda::ports::AgendaServicePort;
use crate::domain::ids::AgendaId;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_event(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(event_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let event_id = AgendaId::from_string(&event_id)?;

    state
        .agenda_service
        .delete_event(&principal, event_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
