use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::ids::LegalCaseId;
use crate::domain::legal_case::ports::LegalCaseServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_case(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(case_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let case_id = LegalCaseId::from_string(&case_id)?;

    state
        .legal_case_service
        .delete_case(&principal, case_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
