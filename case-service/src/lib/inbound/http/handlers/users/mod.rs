pub mod change_password;
pub mod get_profile;
pub mod register_user;
pub mod update_profile;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

pub use change_password::change_password;
pub use get_profile::get_profile;
pub use register_user::register_user;
pub use update_profile::update_profile;

use crate::domain::ids::AccountId;
use crate::domain::ids::RoleId;
use crate::domain::ids::UserId;
use crate::domain::user::models::User;

/// Public view of a user. The password digest never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: UserId,
    pub username: String,
    pub national_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: String,
    pub role_id: RoleId,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.as_str().to_string(),
            national_id: user.national_id.as_str().to_string(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            phone: user.phone.as_ref().map(|p| p.as_str().to_string()),
            city: user.city.as_ref().map(|c| c.as_str().to_string()),
            status: user.status.as_str().to_string(),
            role_id: user.role_id,
            account_id: user.account_id,
            created_at: user.created_at,
        }
    }
}
