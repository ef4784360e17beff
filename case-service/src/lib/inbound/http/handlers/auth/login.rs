use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::ids::AccountId;
use crate::domain::ids::UserId;
use crate::domain::session::models::Session;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::SESSION_COOKIE;
use crate::inbound::http::router::AppState;

/// Exchange credentials for a session.
///
/// The token is set as an `HttpOnly` cookie and also returned in the body
/// for clients that send it as a bearer token.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let session = state
        .session_service
        .login(&body.username, &body.password)
        .await?;

    let data = LoginResponseData::from(session);
    let cookie = Cookie::build((SESSION_COOKIE, data.token.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None);

    Ok((jar.add(cookie), ApiSuccess::new(StatusCode::OK, data)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user_id: UserId,
    pub username: String,
    pub account_id: AccountId,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for LoginResponseData {
    fn from(session: Session) -> Self {
        Self {
            user_id: session.principal.user_id,
            username: session.principal.username.as_str().to_string(),
            account_id: session.principal.account_id,
            expires_at: session.token.expires_at(),
            token: session.token.into_string(),
        }
    }
}
