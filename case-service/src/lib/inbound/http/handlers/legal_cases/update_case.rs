use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::LegalCaseData;
use crate::domain::ids::LegalCaseId;
use crate::domain::legal_case::errors::LegalCaseError;
use crate::domain::legal_case::models::CaseTitle;
use crate::domain::legal_case::models::CaseType;
use crate::domain::legal_case::models::PriorityLevel;
use crate::domain::legal_case::models::UpdateLegalCaseCommand;
use crate::domain::legal_case::ports::LegalCaseServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Partial update body. Unknown fields, including `notes` and `status`,
/// are rejected rather than ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCaseRequest {
    title: Option<String>,
    case_number: Option<String>,
    case_type: Option<String>,
    priority: Option<String>,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

impl UpdateCaseRequest {
    fn try_into_command(self) -> Result<UpdateLegalCaseCommand, LegalCaseError> {
        Ok(UpdateLegalCaseCommand {
            title: self.title.map(CaseTitle::new).transpose()?,
            case_number: self.case_number,
            case_type: self
                .case_type
                .map(|t| t.parse::<CaseType>())
                .transpose()?,
            priority: self
                .priority
                .map(|p| p.parse::<PriorityLevel>())
                .transpose()?,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

pub async fn update_case(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(case_id): Path<String>,
    Json(body): Json<UpdateCaseRequest>,
) -> Result<ApiSuccess<LegalCaseData>, ApiError> {
    let case_id = LegalCaseId::from_string(&case_id)?;
    let command = body.try_into_command()?;

    state
        .legal_case_service
        .update_case(&principal, case_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref case| ApiSuccess::new(StatusCode::OK, case.into()))
}
