use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

use crate::inbound::http::middleware::SESSION_COOKIE;

/// Clear the session cookie.
///
/// Tokens are stateless, so a copied token stays valid until it expires.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}
