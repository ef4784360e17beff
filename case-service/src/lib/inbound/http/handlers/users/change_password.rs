use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::Principal;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<()>, ApiError> {
    if body.new_password.is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "New password must not be empty".to_string(),
        ));
    }

    let command = ChangePasswordCommand {
        current_password: body.current_password,
        new_password: body.new_password,
    };

    state
        .user_service
        .change_password(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
