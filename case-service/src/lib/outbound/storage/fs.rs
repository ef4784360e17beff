use std::io::ErrorKind;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::domain::file::errors::StorageError;
use crate::domain::file::models::StoredObject;
use crate::domain::file::ports::BlobStorage;

/// Blob storage on the local filesystem.
///
/// Object `"{case_id}/{file_name}"` lives at `{root}/{case_id}/{file_name}`.
pub struct FsBlobStorage {
    root: PathBuf,
}

impl FsBlobStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an object name below the root. Only plain relative segments
    /// are accepted.
    fn object_path(&self, object_name: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(object_name);
        let plain = !object_name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !plain {
            return Err(StorageError::InvalidObjectName(object_name.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

/// Media type guessed from the file extension.
fn content_type_for(object_name: &str) -> &'static str {
    let extension = Path::new(object_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl BlobStorage for FsBlobStorage {
    async fn upload(&self, bytes: Vec<u8>, object_name: &str) -> Result<(), StorageError> {
        let path = self.object_path(object_name)?;
        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| StorageError::InvalidObjectName(object_name.to_string()))?;

        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let size_bytes = bytes.len();

        // Staged under a fresh exclusive name in the same directory, then
        // renamed over the target. Readers never see a partial object and
        // no other object is ever overwritten by the staging file.
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut staged = NamedTempFile::new_in(&parent)?;
            staged.write_all(&bytes)?;
            staged.as_file().sync_all()?;
            staged.persist(&path).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Unavailable(e.to_string()))?
        .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        tracing::debug!(object_name, size_bytes, "Blob stored");

        Ok(())
    }

    async fn get(&self, object_name: &str) -> Result<Option<StoredObject>, StorageError> {
        let path = self.object_path(object_name)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(StoredObject {
                bytes,
                content_type: content_type_for(object_name).to_string(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }

    async fn delete(&self, object_name: &str) -> Result<(), StorageError> {
        let path = self.object_path(object_name)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsBlobStorage::new(dir.path());

        storage
            .upload(b"%PDF-1.7".to_vec(), "42/contract.pdf")
            .await
            .unwrap();

        let object = storage.get("42/contract.pdf").await.unwrap().unwrap();
        assert_eq!(object.bytes, b"%PDF-1.7");
        assert_eq!(object.content_type, "application/pdf");
        assert!(dir.path().join("42").join("contract.pdf").exists());

        storage.delete("42/contract.pdf").await.unwrap();
        assert!(storage.get("42/contract.pdf").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsBlobStorage::new(dir.path());

        storage.upload(b"first".to_vec(), "1/notes.txt").await.unwrap();
        storage.upload(b"second".to_vec(), "1/notes.txt").await.unwrap();

        let object = storage.get("1/notes.txt").await.unwrap().unwrap();
        assert_eq!(object.bytes, b"second");
    }

    #[tokio::test]
    async fn test_upload_leaves_sibling_objects_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsBlobStorage::new(dir.path());

        storage
            .upload(b"draft".to_vec(), "42/report.pdf.part")
            .await
            .unwrap();
        storage
            .upload(b"final".to_vec(), "42/report.pdf")
            .await
            .unwrap();

        let sibling = storage.get("42/report.pdf.part").await.unwrap().unwrap();
        assert_eq!(sibling.bytes, b"draft");
        let object = storage.get("42/report.pdf").await.unwrap().unwrap();
        assert_eq!(object.bytes, b"final");

        // No staging files are left behind
        let entries = std::fs::read_dir(dir.path().join("42")).unwrap().count();
        assert_eq!(entries, 2);
    }

    #[tokio::test]
    async fn test_missing_object_and_idempotent_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsBlobStorage::new(dir.path());

        assert!(storage.get("7/absent.bin").await.unwrap().is_none());
        assert!(storage.delete("7/absent.bin").await.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_names_escaping_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsBlobStorage::new(dir.path());

        for name in ["../escape.txt", "/etc/passwd", "1/../../x", ""] {
            assert!(matches!(
                storage.upload(b"x".to_vec(), name).await,
                Err(StorageError::InvalidObjectName(_))
            ));
        }
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type_for("1/scan.PNG"), "image/png");
        assert_eq!(content_type_for("1/archive"), "application/octet-stream");
    }
}
