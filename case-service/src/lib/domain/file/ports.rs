use async_trait::async_trait;

use crate::domain::account::models::StorageQuota;
use crate::domain::file::errors::FileError;
use crate::domain::file::errors::StorageError;
use crate::domain::file::models::CaseFile;
use crate::domain::file::models::FileName;
use crate::domain::file::models::FileRef;
use crate::domain::file::models::NewFile;
use crate::domain::file::models::StoredObject;
use crate::domain::file::models::UploadFileCommand;
use crate::domain::ids::LegalCaseId;
use crate::domain::user::models::Principal;

/// Port for file domain service operations.
#[async_trait]
pub trait FileServicePort: Send + Sync + 'static {
    /// Store a file in a case after the access, name and quota checks pass.
    ///
    /// # Errors
    /// * `Access` - Case is absent or outside the principal's scope
    /// * `NameTaken` - A file with the same name already exists in the case
    /// * `QuotaExceeded` - Account storage ceiling would be exceeded
    /// * `StorageUnavailable` - Blob upload failed; safe to retry
    /// * `DatabaseError` - Database operation failed
    async fn upload_file(
        &self,
        principal: &Principal,
        command: UploadFileCommand,
    ) -> Result<CaseFile, FileError>;

    /// Fetch a file and its content.
    ///
    /// # Errors
    /// * `Access` - File is absent or outside the principal's scope
    /// * `BlobMissing` - Row exists but storage has no content for it
    /// * `StorageUnavailable` - Blob download failed
    async fn download_file(
        &self,
        principal: &Principal,
        file: FileRef,
    ) -> Result<(CaseFile, StoredObject), FileError>;

    /// Remove a file row. The blob is removed afterwards on a best-effort basis.
    async fn delete_file(&self, principal: &Principal, file: FileRef) -> Result<(), FileError>;

    async fn list_case_files(
        &self,
        principal: &Principal,
        case_id: LegalCaseId,
    ) -> Result<Vec<CaseFile>, FileError>;
}

/// Blob storage backend.
#[async_trait]
pub trait BlobStorage: Send + Sync + 'static {
    /// Store `bytes` under `object_name`, replacing any previous content.
    async fn upload(&self, bytes: Vec<u8>, object_name: &str) -> Result<(), StorageError>;

    /// Returns `None` when no object exists under `object_name`.
    async fn get(&self, object_name: &str) -> Result<Option<StoredObject>, StorageError>;

    /// Deleting a missing object is not an error.
    async fn delete(&self, object_name: &str) -> Result<(), StorageError>;
}

/// Persistence operations for files.
#[async_trait]
pub trait FileRepository: Send + Sync + 'static {
    /// Open the unit of work that guards one upload into `case_id`.
    ///
    /// The unit serializes uploads per account until it is recorded or
    /// dropped. Dropping it discards everything it did.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn begin_upload(
        &self,
        principal: &Principal,
        case_id: LegalCaseId,
    ) -> Result<Box<dyn UploadUnit>, FileError>;

    /// Files of a case, in upload order. Callers check access to the case.
    async fn list_for_case(&self, case_id: LegalCaseId) -> Result<Vec<CaseFile>, FileError>;

    /// Delete a file row if it is in the principal's scope.
    ///
    /// Returns the deleted file, or `None` when it is not visible to the
    /// principal.
    async fn delete(
        &self,
        principal: &Principal,
        file: FileRef,
    ) -> Result<Option<CaseFile>, FileError>;
}

/// One upload's checks and write, in a single transaction.
#[async_trait]
pub trait UploadUnit: Send {
    /// Scoped fetch of the target case for the principal the unit was opened for.
    async fn case_in_scope(&mut self) -> Result<bool, FileError>;

    /// Exact-match name lookup within the target case.
    async fn name_taken(&mut self, file_name: &FileName) -> Result<bool, FileError>;

    /// Stored bytes of the account against its subscription ceiling.
    async fn account_usage(&mut self) -> Result<StorageQuota, FileError>;

    /// Insert the file row and its case link, then commit.
    async fn record(self: Box<Self>, file: NewFile) -> Result<CaseFile, FileError>;
}
