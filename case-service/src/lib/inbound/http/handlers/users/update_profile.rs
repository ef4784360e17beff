use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::City;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::Principal;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Contact details the caller may change on their own account.
/// Username, national id and role are not editable here.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    city: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        Ok(UpdateProfileCommand {
            email: self.email.map(EmailAddress::new).transpose()?,
            first_name: self.first_name.map(PersonName::new).transpose()?,
            last_name: self.last_name.map(PersonName::new).transpose()?,
            phone: self.phone.map(PhoneNumber::new).transpose()?,
            city: self.city.map(City::new).transpose()?,
        })
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .user_service
        .update_profile(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
