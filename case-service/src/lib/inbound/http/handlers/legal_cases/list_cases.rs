use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::LegalCaseData;
use crate::domain::legal_case::ports::LegalCaseServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_cases(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<LegalCaseData>>, ApiError> {
    state
        .legal_case_service
        .list_cases(&principal)
        .await
        .map_err(ApiError::from)
        .map(|cases| {
            let data: Vec<LegalCaseData> = cases.iter().map(|c| c.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}
