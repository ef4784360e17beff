use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::LegalCaseData;
use crate::domain::ids::LegalCaseId;
use crate::domain::legal_case::ports::LegalCaseServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateNotesRequest {
    notes: String,
}

pub async fn update_notes(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(case_id): Path<String>,
    Json(body): Json<UpdateNotesRequest>,
) -> Result<ApiSuccess<LegalCaseData>, ApiError> {
    let case_id = LegalCaseId::from_string(&case_id)?;

    state
        .legal_case_service
        .update_notes(&principal, case_id, body.notes)
        .await
        .map_err(ApiError::from)
        .map(|ref case| ApiSuccess::new(StatusCode::OK, case.into()))
}
