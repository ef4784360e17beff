use auth::SessionToken;

use crate::domain::user::models::Principal;

/// Outcome of a successful login.
#[derive(Debug)]
pub struct Session {
    pub principal: Principal,
    pub token: SessionToken,
}
