use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::LegalCaseData;
use crate::domain::ids::ClientId;
use crate::domain::legal_case::errors::LegalCaseError;
use crate::domain::legal_case::models::CaseClient;
use crate::domain::legal_case::models::CaseTitle;
use crate::domain::legal_case::models::CaseType;
use crate::domain::legal_case::models::CreateLegalCaseCommand;
use crate::domain::legal_case::models::PriorityLevel;
use crate::domain::legal_case::ports::LegalCaseServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::clients::NewClientRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_case(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateCaseRequest>,
) -> Result<ApiSuccess<LegalCaseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .legal_case_service
        .create_case(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref case| ApiSuccess::new(StatusCode::CREATED, case.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCaseRequest {
    title: String,
    case_number: Option<String>,
    case_type: Option<String>,
    priority: Option<String>,
    description: Option<String>,
    #[serde(default)]
    notes: String,
    start_date: Option<DateTime<Utc>>,
    /// Existing client of the account. Mutually exclusive with `client`.
    client_id: Option<i64>,
    /// New client registered together with the case.
    client: Option<NewClientRequest>,
}

impl CreateCaseRequest {
    fn try_into_command(self) -> Result<CreateLegalCaseCommand, LegalCaseError> {
        let client = match (self.client_id, self.client) {
            (Some(id), None) => CaseClient::Existing(ClientId(id)),
            (None, Some(client)) => CaseClient::New(client.try_into_client()?),
            _ => return Err(LegalCaseError::ClientUnspecified),
        };

        Ok(CreateLegalCaseCommand {
            title: CaseTitle::new(self.title)?,
            case_number: self.case_number,
            case_type: self
                .case_type
                .map(|t| t.parse::<CaseType>())
                .transpose()?
                .unwrap_or(CaseType::Civil),
            priority: self
                .priority
                .map(|p| p.parse::<PriorityLevel>())
                .transpose()?
                .unwrap_or(PriorityLevel::Normal),
            description: self.description,
            notes: self.notes,
            start_date: self.start_date.unwrap_or_else(Utc::now),
            client,
        })
    }
}
