pub mod delete_file;
pub mod download_file;
pub mod list_case_files;
pub mod upload_file;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

pub use delete_file::delete_file;
pub use download_file::download_file;
pub use list_case_files::list_case_files;
pub use upload_file::upload_file;

use crate::domain::file::models::CaseFile;
use crate::domain::file::models::FileRef;
use crate::domain::ids::FileId;
use crate::domain::ids::LegalCaseId;
use crate::inbound::http::handlers::ApiError;

/// File metadata. The storage path is internal and not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileData {
    pub id: FileId,
    pub case_id: LegalCaseId,
    pub file_name: String,
    pub size_bytes: i64,
    pub upload_date: DateTime<Utc>,
    pub status: String,
}

impl From<&CaseFile> for FileData {
    fn from(file: &CaseFile) -> Self {
        Self {
            id: file.id,
            case_id: file.case_id,
            file_name: file.file_name.as_str().to_string(),
            size_bytes: file.size_bytes,
            upload_date: file.upload_date,
            status: file.status.as_str().to_string(),
        }
    }
}

fn parse_file_ref(case_id: &str, file_id: &str) -> Result<FileRef, ApiError> {
    Ok(FileRef {
        case_id: LegalCaseId::from_string(case_id)?,
        file_id: FileId::from_string(file_id)?,
    })
}
