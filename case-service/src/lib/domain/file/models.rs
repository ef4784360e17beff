use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::access::models::ResourceKind;
use crate::domain::access::models::ScopedResource;
use crate::domain::file::errors::FileNameError;
use crate::domain::ids::FileId;
use crate::domain::ids::LegalCaseId;

/// File attached to a legal case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFile {
    pub id: FileId,
    pub case_id: LegalCaseId,
    pub file_name: FileName,
    /// Object name in blob storage.
    pub file_path: String,
    pub size_bytes: i64,
    pub upload_date: DateTime<Utc>,
    pub status: FileStatus,
}

impl ScopedResource for CaseFile {
    type Id = FileRef;
    const KIND: ResourceKind = ResourceKind::File;
}

/// Files are addressed through the case they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileRef {
    pub case_id: LegalCaseId,
    pub file_id: FileId,
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.case_id, self.file_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Active,
    Inactive,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Active => "active",
            FileStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for FileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(FileStatus::Active),
            "inactive" => Ok(FileStatus::Inactive),
            other => Err(format!("Unknown file status: {}", other)),
        }
    }
}

/// Name of an uploaded file, unique within its case.
///
/// 1-100 characters, no path separators, no `.` or `..`. The name becomes the
/// last segment of the blob object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName(String);

impl FileName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, FileNameError> {
        let length = name.chars().count();
        if name.trim().is_empty() {
            return Err(FileNameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(FileNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if name == "."
            || name == ".."
            || name.chars().any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(FileNameError::InvalidCharacters);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Blob object name of a file: `{case_id}/{file_name}`.
pub fn object_name(case_id: LegalCaseId, file_name: &FileName) -> String {
    format!("{}/{}", case_id, file_name)
}

/// File row to insert once the blob is stored.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub case_id: LegalCaseId,
    pub file_name: FileName,
    pub file_path: String,
    pub size_bytes: i64,
    pub upload_date: DateTime<Utc>,
}

/// Blob content with its media type.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredObject")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Command to upload a file into a case.
#[derive(Debug)]
pub struct UploadFileCommand {
    pub case_id: LegalCaseId,
    pub file_name: FileName,
    pub bytes: Vec<u8>,
}
