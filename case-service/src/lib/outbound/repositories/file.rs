use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Row;
use sqlx::Transaction;

use super::legal_case::LegalCaseScope;
use super::scope::fetch_scoped;
use super::scope::PgQuery;
use super::scope::ScopePolicy;
use crate::domain::access::errors::AccessError;
use crate::domain::account::models::StorageQuota;
use crate::domain::file::errors::FileError;
use crate::domain::file::models::CaseFile;
use crate::domain::file::models::FileName;
use crate::domain::file::models::FileRef;
use crate::domain::file::models::FileStatus;
use crate::domain::file::models::NewFile;
use crate::domain::file::ports::FileRepository;
use crate::domain::file::ports::UploadUnit;
use crate::domain::ids::FileId;
use crate::domain::ids::LegalCaseId;
use crate::domain::user::models::Principal;

/// A file is visible through a case of the principal's account that the
/// principal is a member of.
pub struct CaseFileScope;

impl ScopePolicy for CaseFileScope {
    type Resource = CaseFile;

    const SELECT: &'static str = r#"
        SELECT f.id, lf.legal_case_id, f.file_name, f.file_path, f.size_bytes,
               f.upload_date, f.status
        FROM files f
        JOIN legal_case_x_files lf ON lf.file_id = f.id
        JOIN legal_cases lc ON lc.id = lf.legal_case_id
    "#;

    const MEMBERSHIP: &'static str = r#"
        lc.account_id = $1
        AND EXISTS (
            SELECT 1 FROM legal_case_x_users m
            WHERE m.legal_case_id = lc.id AND m.user_id = $2
        )
    "#;

    const ID_PREDICATE: &'static str = "f.id = $3 AND lf.legal_case_id = $4";

    const LOCK_CLAUSE: &'static str = "FOR UPDATE OF f";

    const EXISTS: &'static str =
        "SELECT 1 FROM legal_case_x_files WHERE file_id = $1 AND legal_case_id = $2";

    fn bind_id<'q>(query: PgQuery<'q>, file: FileRef) -> PgQuery<'q> {
        query.bind(file.file_id.as_i64()).bind(file.case_id.as_i64())
    }

    fn from_row(row: &PgRow) -> Result<CaseFile, AccessError> {
        row_to_file(row).map_err(|e| AccessError::DatabaseError(e.to_string()))
    }
}

fn database_error(e: sqlx::Error) -> FileError {
    FileError::DatabaseError(e.to_string())
}

fn row_to_file(r: &PgRow) -> Result<CaseFile, FileError> {
    Ok(CaseFile {
        id: FileId(r.get("id")),
        case_id: LegalCaseId(r.get("legal_case_id")),
        file_name: FileName::new(r.get("file_name"))?,
        file_path: r.get("file_path"),
        size_bytes: r.get("size_bytes"),
        upload_date: r.get("upload_date"),
        status: r
            .get::<String, _>("status")
            .parse::<FileStatus>()
            .map_err(FileError::Unknown)?,
    })
}

pub struct PostgresFileRepository {
    pool: PgPool,
}

impl PostgresFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn begin_upload(
        &self,
        principal: &Principal,
        case_id: LegalCaseId,
    ) -> Result<Box<dyn UploadUnit>, FileError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Serializes quota and name checks of concurrent uploads of one account.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended(format('files:%s', $1::BIGINT), 0))")
            .bind(principal.account_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        Ok(Box::new(PgUploadUnit {
            tx,
            principal: principal.clone(),
            case_id,
        }))
    }

    async fn list_for_case(&self, case_id: LegalCaseId) -> Result<Vec<CaseFile>, FileError> {
        let rows = sqlx::query(&format!(
            "{} WHERE lf.legal_case_id = $1 ORDER BY f.upload_date, f.id",
            CaseFileScope::SELECT
        ))
        .bind(case_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(row_to_file).collect()
    }

    async fn delete(
        &self,
        principal: &Principal,
        file: FileRef,
    ) -> Result<Option<CaseFile>, FileError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let Some(found) = fetch_scoped::<CaseFileScope, _>(&mut *tx, principal, file, true).await?
        else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(found.id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(Some(found))
    }
}

/// Upload guard holding the account's advisory lock until commit or drop.
struct PgUploadUnit {
    tx: Transaction<'static, Postgres>,
    principal: Principal,
    case_id: LegalCaseId,
}

#[async_trait]
impl UploadUnit for PgUploadUnit {
    async fn case_in_scope(&mut self) -> Result<bool, FileError> {
        // The case row stays locked so it cannot be deleted under the upload.
        let case =
            fetch_scoped::<LegalCaseScope, _>(&mut *self.tx, &self.principal, self.case_id, true)
                .await?;
        Ok(case.is_some())
    }

    async fn name_taken(&mut self, file_name: &FileName) -> Result<bool, FileError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM files f
                JOIN legal_case_x_files lf ON lf.file_id = f.id
                WHERE lf.legal_case_id = $1 AND f.file_name = $2
            )
            "#,
        )
        .bind(self.case_id.as_i64())
        .bind(file_name.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(database_error)
    }

    async fn account_usage(&mut self) -> Result<StorageQuota, FileError> {
        let row = sqlx::query(
            r#"
            SELECT s.storage_limit_bytes AS limit_bytes,
                   (
                       SELECT COALESCE(SUM(f.size_bytes), 0)::BIGINT
                       FROM files f
                       WHERE f.id IN (
                           SELECT lf.file_id
                           FROM legal_case_x_files lf
                           JOIN legal_cases lc ON lc.id = lf.legal_case_id
                           WHERE lc.account_id = a.id
                       )
                   ) AS used_bytes
            FROM accounts a
            JOIN subscriptions s ON s.id = a.subscription_id
            WHERE a.id = $1
            "#,
        )
        .bind(self.principal.account_id.as_i64())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(database_error)?;

        Ok(StorageQuota {
            used_bytes: row.get("used_bytes"),
            limit_bytes: row.get("limit_bytes"),
        })
    }

    async fn record(self: Box<Self>, file: NewFile) -> Result<CaseFile, FileError> {
        let PgUploadUnit { mut tx, .. } = *self;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO files (file_name, file_path, size_bytes, upload_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(file.file_name.as_str())
        .bind(&file.file_path)
        .bind(file.size_bytes)
        .bind(file.upload_date)
        .bind(FileStatus::Active.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        sqlx::query("INSERT INTO legal_case_x_files (legal_case_id, file_id) VALUES ($1, $2)")
            .bind(file.case_id.as_i64())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(CaseFile {
            id: FileId(id),
            case_id: file.case_id,
            file_name: file.file_name,
            file_path: file.file_path,
            size_bytes: file.size_bytes,
            upload_date: file.upload_date,
            status: FileStatus::Active,
        })
    }
}
