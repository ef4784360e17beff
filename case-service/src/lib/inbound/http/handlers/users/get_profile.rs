use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::UserData;
use crate::domain::user::models::Principal;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .user_service
        .get_profile(&principal)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub user: UserData,
    pub role_name: String,
    pub account_email: String,
    pub subscription_plan: String,
}

impl From<&UserProfile> for ProfileResponseData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user: (&profile.user).into(),
            role_name: profile.role_name.clone(),
            account_email: profile.account_email.clone(),
            subscription_plan: profile.subscription_plan.clone(),
        }
    }
}
