use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_file_ref;
use crate::domain::file::ports::FileServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_file(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((case_id, file_id)): Path<(String, String)>,
) -> Result<ApiSuccess<()>, ApiError> {
    let file = parse_file_ref(&case_id, &file_id)?;

    state
        .file_service
        .delete_file(&principal, file)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
