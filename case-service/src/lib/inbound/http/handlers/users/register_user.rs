use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::UserData;
use crate::domain::ids::RoleId;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::NationalIdError;
use crate::domain::user::errors::PersonNameError;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::Principal;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Register a user in the caller's account.
pub async fn register_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register_user(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    username: String,
    national_id: String,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
    role_id: i64,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid national id: {0}")]
    NationalId(#[from] NationalIdError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] PersonNameError),

    #[error("Password must not be empty")]
    EmptyPassword,
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterUserRequestError> {
        if self.password.is_empty() {
            return Err(ParseRegisterUserRequestError::EmptyPassword);
        }

        Ok(RegisterUserCommand {
            username: Username::new(self.username)?,
            national_id: NationalId::new(self.national_id)?,
            email: EmailAddress::new(self.email)?,
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
            password: self.password,
            role_id: RoleId(self.role_id),
        })
    }
}

impl From<ParseRegisterUserRequestError> for ApiError {
    fn from(err: ParseRegisterUserRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
