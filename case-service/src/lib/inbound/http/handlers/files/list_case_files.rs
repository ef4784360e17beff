use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::FileData;
use crate::domain::file::ports::FileServicePort;
use crate::domain::ids::LegalCaseId;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_case_files(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(case_id): Path<String>,
) -> Result<ApiSuccess<Vec<FileData>>, ApiError> {
    let case_id = LegalCaseId::from_string(&case_id)?;

    state
        .file_service
        .list_case_files(&principal, case_id)
        .await
        .map_err(ApiError::from)
        .map(|files| {
            let data: Vec<FileData> = files.iter().map(|f| f.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}
