pub mod create_case;
pub mod delete_case;
pub mod get_case;
pub mod list_cases;
pub mod update_case;
pub mod update_notes;
pub mod update_status;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

pub use create_case::create_case;
pub use delete_case::delete_case;
pub use get_case::get_case;
pub use list_cases::list_cases;
pub use update_case::update_case;
pub use update_notes::update_notes;
pub use update_status::update_status;

use crate::domain::ids::ClientId;
use crate::domain::ids::LegalCaseId;
use crate::domain::ids::UserId;
use crate::domain::legal_case::models::LegalCase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalCaseData {
    pub id: LegalCaseId,
    pub title: String,
    pub case_number: Option<String>,
    pub case_type: String,
    pub priority: String,
    pub status: String,
    pub description: Option<String>,
    pub notes: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub client_id: ClientId,
    pub member_ids: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<&LegalCase> for LegalCaseData {
    fn from(case: &LegalCase) -> Self {
        Self {
            id: case.id,
            title: case.title.as_str().to_string(),
            case_number: case.case_number.clone(),
            case_type: case.case_type.as_str().to_string(),
            priority: case.priority.as_str().to_string(),
            status: case.status.as_str().to_string(),
            description: case.description.clone(),
            notes: case.notes.clone(),
            start_date: case.start_date,
            end_date: case.end_date,
            client_id: case.client_id,
            member_ids: case.member_ids.clone(),
            created_at: case.created_at,
        }
    }
}
