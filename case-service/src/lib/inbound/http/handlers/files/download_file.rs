use axum::extract::Path;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;

use super::parse_file_ref;
use crate::domain::file::ports::FileServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Stream a file back with the content type recorded by storage.
pub async fn download_file(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((case_id, file_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let file = parse_file_ref(&case_id, &file_id)?;

    let (file, object) = state
        .file_service
        .download_file(&principal, file)
        .await
        .map_err(ApiError::from)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.file_name.as_str().replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, object.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        object.bytes,
    )
        .into_response())
}
