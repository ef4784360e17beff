use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::ports::ResourceScope;
use crate::domain::access::service::ensure_active;
use crate::domain::access::service::AccessScoper;
use crate::domain::file::errors::FileError;
use crate::domain::file::models::object_name;
use crate::domain::file::models::CaseFile;
use crate::domain::file::models::FileRef;
use crate::domain::file::models::NewFile;
use crate::domain::file::models::StoredObject;
use crate::domain::file::models::UploadFileCommand;
use crate::domain::file::ports::BlobStorage;
use crate::domain::file::ports::FileRepository;
use crate::domain::file::ports::FileServicePort;
use crate::domain::ids::LegalCaseId;
use crate::domain::legal_case::models::LegalCase;
use crate::domain::user::models::Principal;

/// Domain service implementation for file operations.
pub struct FileService<FR, BS, CS, FS>
where
    FR: FileRepository,
    BS: BlobStorage,
    CS: ResourceScope<LegalCase>,
    FS: ResourceScope<CaseFile>,
{
    repository: Arc<FR>,
    storage: Arc<BS>,
    cases: AccessScoper<LegalCase, CS>,
    files: AccessScoper<CaseFile, FS>,
}

impl<FR, BS, CS, FS> FileService<FR, BS, CS, FS>
where
    FR: FileRepository,
    BS: BlobStorage,
    CS: ResourceScope<LegalCase>,
    FS: ResourceScope<CaseFile>,
{
    pub fn new(
        repository: Arc<FR>,
        storage: Arc<BS>,
        case_scope: Arc<CS>,
        file_scope: Arc<FS>,
    ) -> Self {
        Self {
            repository,
            storage,
            cases: AccessScoper::new(case_scope),
            files: AccessScoper::new(file_scope),
        }
    }
}

#[async_trait]
impl<FR, BS, CS, FS> FileServicePort for FileService<FR, BS, CS, FS>
where
    FR: FileRepository,
    BS: BlobStorage,
    CS: ResourceScope<LegalCase>,
    FS: ResourceScope<CaseFile>,
{
    async fn upload_file(
        &self,
        principal: &Principal,
        command: UploadFileCommand,
    ) -> Result<CaseFile, FileError> {
        ensure_active(principal)?;

        let UploadFileCommand {
            case_id,
            file_name,
            bytes,
        } = command;
        let size_bytes = i64::try_from(bytes.len()).map_err(|_| FileError::TooLarge)?;

        let mut unit = self.repository.begin_upload(principal, case_id).await?;

        if !unit.case_in_scope().await? {
            drop(unit);
            return Err(self.cases.classify_miss(principal, case_id).await.into());
        }

        if unit.name_taken(&file_name).await? {
            return Err(FileError::NameTaken {
                case_id,
                file_name: file_name.as_str().to_string(),
            });
        }

        let quota = unit.account_usage().await?;
        if !quota.admits(size_bytes) {
            tracing::info!(
                account_id = %principal.account_id,
                used_bytes = quota.used_bytes,
                limit_bytes = quota.limit_bytes,
                requested_bytes = size_bytes,
                "Upload rejected by storage quota"
            );
            return Err(FileError::QuotaExceeded {
                used_bytes: quota.used_bytes,
                limit_bytes: quota.limit_bytes,
                requested_bytes: size_bytes,
            });
        }

        let file_path = object_name(case_id, &file_name);

        self.storage
            .upload(bytes, &file_path)
            .await
            .map_err(|e| {
                tracing::warn!(object_name = %file_path, error = %e, "Blob upload failed");
                FileError::from(e)
            })?;

        let new_file = NewFile {
            case_id,
            file_name,
            file_path: file_path.clone(),
            size_bytes,
            upload_date: Utc::now(),
        };

        match unit.record(new_file).await {
            Ok(file) => {
                tracing::info!(
                    file_id = %file.id,
                    case_id = %case_id,
                    size_bytes,
                    "File uploaded"
                );
                Ok(file)
            }
            Err(e) => {
                tracing::error!(
                    object_name = %file_path,
                    case_id = %case_id,
                    error = %e,
                    "File row not recorded after blob upload; orphaned blob left in storage"
                );
                Err(e)
            }
        }
    }

    async fn download_file(
        &self,
        principal: &Principal,
        file: FileRef,
    ) -> Result<(CaseFile, StoredObject), FileError> {
        let file = self.files.fetch(principal, file).await?;

        let object = self
            .storage
            .get(&file.file_path)
            .await?
            .ok_or_else(|| FileError::BlobMissing(file.file_path.clone()))?;

        Ok((file, object))
    }

    async fn delete_file(&self, principal: &Principal, file: FileRef) -> Result<(), FileError> {
        ensure_active(principal)?;

        let deleted = match self.repository.delete(principal, file).await? {
            Some(deleted) => deleted,
            None => return Err(self.files.classify_miss(principal, file).await.into()),
        };

        if let Err(e) = self.storage.delete(&deleted.file_path).await {
            tracing::error!(
                object_name = %deleted.file_path,
                error = %e,
                "Blob delete failed after file row removal"
            );
        }

        tracing::info!(file = %file, deleted_by = %principal.user_id, "File deleted");

        Ok(())
    }

    async fn list_case_files(
        &self,
        principal: &Principal,
        case_id: LegalCaseId,
    ) -> Result<Vec<CaseFile>, FileError> {
        let case = self.cases.fetch(principal, case_id).await?;
        self.repository.list_for_case(case.id).await
    }
}
