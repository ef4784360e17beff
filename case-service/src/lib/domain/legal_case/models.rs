use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::access::models::ResourceKind;
use crate::domain::client::models::NewClient;
use crate::domain::access::models::ScopedResource;
use crate::domain::ids::AccountId;
use crate::domain::ids::ClientId;
use crate::domain::ids::LegalCaseId;
use crate::domain::ids::UserId;
use crate::domain::legal_case::errors::CaseAttributeError;
use crate::domain::legal_case::errors::CaseTitleError;
use crate::domain::legal_case::errors::LegalCaseError;

/// Legal case aggregate.
///
/// Visible to a principal only when the principal is listed in
/// `member_ids` and belongs to `account_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegalCase {
    pub id: LegalCaseId,
    pub title: CaseTitle,
    pub case_number: Option<String>,
    pub case_type: CaseType,
    pub priority: PriorityLevel,
    pub status: CaseStatus,
    pub description: Option<String>,
    pub notes: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub account_id: AccountId,
    pub client_id: ClientId,
    pub member_ids: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl ScopedResource for LegalCase {
    type Id = LegalCaseId;
    const KIND: ResourceKind = ResourceKind::LegalCase;
}

impl LegalCase {
    /// Merge a partial update onto the case.
    ///
    /// # Errors
    /// * `InvalidDateRange` - Resulting end date precedes the start date
    pub fn apply(&mut self, command: UpdateLegalCaseCommand) -> Result<(), LegalCaseError> {
        let UpdateLegalCaseCommand {
            title,
            case_number,
            case_type,
            priority,
            description,
            start_date,
            end_date,
        } = command;

        let start_date = start_date.or(self.start_date);
        let end_date = end_date.or(self.end_date);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(LegalCaseError::InvalidDateRange);
            }
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(case_number) = case_number {
            self.case_number = Some(case_number);
        }
        if let Some(case_type) = case_type {
            self.case_type = case_type;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        self.start_date = start_date;
        self.end_date = end_date;

        Ok(())
    }
}

/// Case title, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTitle(String);

impl CaseTitle {
    const MAX_LENGTH: usize = 100;

    pub fn new(title: String) -> Result<Self, CaseTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();
        if length == 0 {
            Err(CaseTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(CaseTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $error:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CaseAttributeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(CaseAttributeError::$error(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// Area of law a case belongs to.
    CaseType, UnknownCaseType {
        Civil => "civil",
        Criminal => "criminal",
        Labor => "labor",
        AdministrativeLitigation => "administrative_litigation",
        Commercial => "commercial",
        SmallClaims => "small_claims",
        Family => "family",
        Administrative => "administrative",
        Tax => "tax",
        Constitutional => "constitutional",
        Environmental => "environmental",
        International => "international",
    }
);

string_enum!(
    PriorityLevel, UnknownPriority {
        Normal => "normal",
        Mid => "mid",
        High => "high",
    }
);

string_enum!(
    /// Lifecycle of a case. Only `Active` cases are still being worked on.
    CaseStatus, UnknownStatus {
        Active => "active",
        Won => "won",
        Lost => "lost",
        Settled => "settled",
    }
);

/// Command to open a case. The creator becomes its first member.
#[derive(Debug, Clone)]
pub struct CreateLegalCaseCommand {
    pub title: CaseTitle,
    pub case_number: Option<String>,
    pub case_type: CaseType,
    pub priority: PriorityLevel,
    pub description: Option<String>,
    pub notes: String,
    pub start_date: DateTime<Utc>,
    pub client: CaseClient,
}

/// Client a new case is opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseClient {
    /// Client already linked to the principal's account.
    Existing(ClientId),
    /// Client created and linked to the account together with the case.
    New(NewClient),
}

/// Partial update of the descriptive fields of a case.
///
/// Notes and status have dedicated operations and are not part of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateLegalCaseCommand {
    pub title: Option<CaseTitle>,
    pub case_number: Option<String>,
    pub case_type: Option<CaseType>,
    pub priority: Option<PriorityLevel>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl UpdateLegalCaseCommand {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
