use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::FileData;
use crate::domain::file::errors::FileError;
use crate::domain::file::models::FileName;
use crate::domain::file::models::UploadFileCommand;
use crate::domain::file::ports::FileServicePort;
use crate::domain::ids::LegalCaseId;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct UploadFileParams {
    name: String,
}

/// Store the raw request body as a file of the case.
///
/// `POST /api/cases/:case_id/files?name=contract.pdf`
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(case_id): Path<String>,
    Query(params): Query<UploadFileParams>,
    body: Bytes,
) -> Result<ApiSuccess<FileData>, ApiError> {
    let command = UploadFileCommand {
        case_id: LegalCaseId::from_string(&case_id)?,
        file_name: FileName::new(params.name).map_err(FileError::from)?,
        bytes: body.to_vec(),
    };

    state
        .file_service
        .upload_file(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref file| ApiSuccess::new(StatusCode::CREATED, file.into()))
}
