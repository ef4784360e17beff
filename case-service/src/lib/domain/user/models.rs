use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::AccountStatus;
use crate::domain::ids::AccountId;
use crate::domain::ids::RoleId;
use crate::domain::ids::UserId;
use crate::user::errors::EmailError;
use crate::user::errors::NationalIdError;
use crate::user::errors::PersonNameError;
use crate::user::errors::PhoneError;
use crate::user::errors::CityError;
use crate::user::errors::UserStatusError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// A user belongs to exactly one account and is never physically deleted;
/// deactivation flips `status`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub national_id: NationalId,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: Option<PhoneNumber>,
    pub city: Option<City>,
    pub password_hash: String,
    pub status: UserStatus,
    pub role_id: RoleId,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Merge a profile update. Absent fields keep their value.
    pub fn apply_profile(&mut self, command: UpdateProfileCommand) {
        if let Some(email) = command.email {
            self.email = email;
        }
        if let Some(first_name) = command.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = command.last_name {
            self.last_name = last_name;
        }
        if let Some(phone) = command.phone {
            self.phone = Some(phone);
        }
        if let Some(city) = command.city {
            self.city = Some(city);
        }
    }
}

/// Authenticated identity a request acts as.
///
/// Carries the account status so that authorization can refuse principals of
/// soft-deleted tenants without another lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub username: Username,
    pub account_id: AccountId,
    pub account_status: AccountStatus,
    pub role_id: RoleId,
}

/// Active user found by login name, with the digest to verify against.
#[derive(Debug, Clone)]
pub struct LoginCandidate {
    pub principal: Principal,
    pub password_hash: String,
}

/// Read model for the profile endpoint.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub role_name: String,
    pub account_email: String,
    pub subscription_plan: String,
}

/// User lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(UserStatusError::Unknown(other.to_string())),
        }
    }
}

/// Username value type
///
/// Ensures username is 3-24 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 24;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 24 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// National identity document number.
///
/// Up to 30 alphanumeric characters or hyphens, unique across users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalId(String);

impl NationalId {
    const MAX_LENGTH: usize = 30;

    /// # Errors
    /// * `Empty` - Blank value
    /// * `TooLong` - More than 30 characters
    /// * `InvalidCharacters` - Anything other than ASCII alphanumerics and hyphens
    pub fn new(value: String) -> Result<Self, NationalIdError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(NationalIdError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(NationalIdError::TooLong {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(NationalIdError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First or last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `Empty` - Blank value
    /// * `TooLong` - More than 50 characters
    pub fn new(value: String) -> Result<Self, PersonNameError> {
        let value = value.trim().to_string();
        let length = value.chars().count();
        if length == 0 {
            Err(PersonNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contact phone: digits with optional `+`, spaces, hyphens and parentheses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MAX_LENGTH: usize = 20;

    /// # Errors
    /// * `Empty` - Blank value
    /// * `TooLong` - More than 20 characters
    /// * `InvalidCharacters` - Letters or other symbols
    pub fn new(value: String) -> Result<Self, PhoneError> {
        let value = value.trim().to_string();
        let length = value.chars().count();
        if length == 0 {
            return Err(PhoneError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(PhoneError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'))
        {
            return Err(PhoneError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City(String);

impl City {
    const MAX_LENGTH: usize = 100;

    pub fn new(value: String) -> Result<Self, CityError> {
        let value = value.trim().to_string();
        let length = value.chars().count();
        if length == 0 {
            Err(CityError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(CityError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a user inside the acting principal's account.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub national_id: NationalId,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: String,
    pub role_id: RoleId,
}

/// User row to insert; the database assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub national_id: NationalId,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password_hash: String,
    pub status: UserStatus,
    pub role_id: RoleId,
    pub account_id: AccountId,
}

/// Partial update of the caller's own contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileCommand {
    pub email: Option<EmailAddress>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub phone: Option<PhoneNumber>,
    pub city: Option<City>,
}

impl UpdateProfileCommand {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Command to replace the caller's password.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub current_password: String,
    pub new_password: String,
}
