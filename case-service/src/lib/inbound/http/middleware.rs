use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "accessToken";

/// Middleware that resolves the session token into a `Principal` and adds it
/// to request extensions.
///
/// Candidates are the session cookie, then an `Authorization: Bearer` header.
/// The first one that resolves wins, so a stale cookie left in a browser does
/// not shadow a valid bearer token.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let candidates = session_tokens(&jar, req.headers());
    if candidates.is_empty() {
        tracing::warn!(uri = %req.uri(), "Request without session token");
        return Err(ApiError::Unauthorized("Missing session token".to_string()));
    }

    let mut principal = None;
    for token in &candidates {
        principal = state.session_service.resolve(token).await;
        if principal.is_some() {
            break;
        }
    }

    let principal = principal.ok_or_else(|| {
        tracing::warn!(uri = %req.uri(), "Session token rejected");
        ApiError::Unauthorized("Invalid or expired session".to_string())
    })?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn session_tokens(jar: &CookieJar, headers: &HeaderMap) -> Vec<String> {
    let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    cookie.into_iter().chain(bearer).collect()
}
