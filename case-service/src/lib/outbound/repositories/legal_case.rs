use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Row;
use sqlx::Transaction;

use super::scope::fetch_scoped;
use super::scope::fetch_visible;
use super::scope::PgQuery;
use super::scope::ScopePolicy;
use crate::domain::access::errors::AccessError;
use crate::domain::client::models::NewClient;
use crate::domain::ids::AccountId;
use crate::domain::ids::ClientId;
use crate::domain::ids::LegalCaseId;
use crate::domain::ids::UserId;
use crate::domain::legal_case::errors::LegalCaseError;
use crate::domain::legal_case::models::CaseClient;
use crate::domain::legal_case::models::CaseStatus;
use crate::domain::legal_case::models::CaseTitle;
use crate::domain::legal_case::models::CreateLegalCaseCommand;
use crate::domain::legal_case::models::LegalCase;
use crate::domain::legal_case::models::UpdateLegalCaseCommand;
use crate::domain::legal_case::ports::LegalCaseRepository;
use crate::domain::user::models::Principal;

/// A case is visible to its members, inside the case's account.
pub struct LegalCaseScope;

impl ScopePolicy for LegalCaseScope {
    type Resource = LegalCase;

    const SELECT: &'static str = r#"
        SELECT lc.id, lc.title, lc.case_number, lc.case_type, lc.priority, lc.status,
               lc.description, lc.notes, lc.start_date, lc.end_date, lc.account_id,
               lc.client_id, lc.created_at,
               ARRAY(
                   SELECT m.user_id FROM legal_case_x_users m
                   WHERE m.legal_case_id = lc.id
                   ORDER BY m.user_id
               ) AS member_ids
        FROM legal_cases lc
    "#;

    const MEMBERSHIP: &'static str = r#"
        lc.account_id = $1
        AND EXISTS (
            SELECT 1 FROM legal_case_x_users m
            WHERE m.legal_case_id = lc.id AND m.user_id = $2
        )
    "#;

    const ID_PREDICATE: &'static str = "lc.id = $3";

    const LOCK_CLAUSE: &'static str = "FOR UPDATE OF lc";

    const EXISTS: &'static str = "SELECT 1 FROM legal_cases WHERE id = $1";

    fn bind_id<'q>(query: PgQuery<'q>, id: LegalCaseId) -> PgQuery<'q> {
        query.bind(id.as_i64())
    }

    fn from_row(row: &PgRow) -> Result<LegalCase, AccessError> {
        row_to_case(row).map_err(|e| AccessError::DatabaseError(e.to_string()))
    }
}

fn row_to_case(r: &PgRow) -> Result<LegalCase, LegalCaseError> {
    Ok(LegalCase {
        id: LegalCaseId(r.get("id")),
        title: CaseTitle::new(r.get("title"))?,
        case_number: r.get("case_number"),
        case_type: r.get::<String, _>("case_type").parse()?,
        priority: r.get::<String, _>("priority").parse()?,
        status: r.get::<String, _>("status").parse()?,
        description: r.get("description"),
        notes: r.get("notes"),
        start_date: r.get("start_date"),
        end_date: r.get("end_date"),
        account_id: AccountId(r.get("account_id")),
        client_id: ClientId(r.get("client_id")),
        member_ids: r
            .get::<Vec<i64>, _>("member_ids")
            .into_iter()
            .map(UserId)
            .collect(),
        created_at: r.get("created_at"),
    })
}

fn database_error(e: sqlx::Error) -> LegalCaseError {
    LegalCaseError::DatabaseError(e.to_string())
}

/// Register a client and link it to the principal's account.
async fn insert_client(
    tx: &mut Transaction<'_, Postgres>,
    principal: &Principal,
    client: &NewClient,
) -> Result<ClientId, LegalCaseError> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO clients (first_name, last_name, email, national_id, phone, address)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(client.first_name.as_str())
    .bind(client.last_name.as_str())
    .bind(client.email.as_str())
    .bind(client.national_id.as_str())
    .bind(client.phone.as_ref().map(|p| p.as_str()))
    .bind(&client.address)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            LegalCaseError::ClientAlreadyExists(client.national_id.as_str().to_string())
        }
        _ => database_error(e),
    })?;

    sqlx::query("INSERT INTO account_x_clients (account_id, client_id) VALUES ($1, $2)")
        .bind(principal.account_id.as_i64())
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(database_error)?;

    tracing::info!(
        client_id = id,
        account_id = %principal.account_id,
        "Client registered"
    );

    Ok(ClientId(id))
}

pub struct PostgresLegalCaseRepository {
    pool: PgPool,
}

impl PostgresLegalCaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Set one text column of a case after locking it through the scoped fetch.
    async fn set_scoped_column(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        column: &'static str,
        value: &str,
    ) -> Result<Option<LegalCase>, LegalCaseError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        if fetch_scoped::<LegalCaseScope, _>(&mut *tx, principal, id, true)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        sqlx::query(&format!("UPDATE legal_cases SET {column} = $2 WHERE id = $1"))
            .bind(id.as_i64())
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        let case = fetch_scoped::<LegalCaseScope, _>(&mut *tx, principal, id, false).await?;
        tx.commit().await.map_err(database_error)?;

        Ok(case)
    }
}

#[async_trait]
impl LegalCaseRepository for PostgresLegalCaseRepository {
    async fn create(
        &self,
        principal: &Principal,
        command: CreateLegalCaseCommand,
    ) -> Result<LegalCase, LegalCaseError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let client_id = match &command.client {
            CaseClient::Existing(client_id) => {
                let client_linked = sqlx::query_scalar::<_, bool>(
                    r#"
                    SELECT EXISTS (
                        SELECT 1 FROM account_x_clients
                        WHERE account_id = $1 AND client_id = $2
                    )
                    "#,
                )
                .bind(principal.account_id.as_i64())
                .bind(client_id.as_i64())
                .fetch_one(&mut *tx)
                .await
                .map_err(database_error)?;

                if !client_linked {
                    return Err(LegalCaseError::ClientNotFound(*client_id));
                }
                *client_id
            }
            CaseClient::New(client) => insert_client(&mut tx, principal, client).await?,
        };

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO legal_cases (title, case_number, case_type, priority, description,
                                     notes, start_date, account_id, client_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(command.title.as_str())
        .bind(&command.case_number)
        .bind(command.case_type.as_str())
        .bind(command.priority.as_str())
        .bind(&command.description)
        .bind(&command.notes)
        .bind(command.start_date)
        .bind(principal.account_id.as_i64())
        .bind(client_id.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        sqlx::query("INSERT INTO legal_case_x_users (legal_case_id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(principal.user_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        let case = fetch_scoped::<LegalCaseScope, _>(&mut *tx, principal, LegalCaseId(id), false)
            .await?
            .ok_or_else(|| LegalCaseError::Unknown(format!("Case {} vanished on create", id)))?;

        tx.commit().await.map_err(database_error)?;

        Ok(case)
    }

    async fn list_for_member(
        &self,
        principal: &Principal,
    ) -> Result<Vec<LegalCase>, LegalCaseError> {
        Ok(fetch_visible::<LegalCaseScope, _>(
            &self.pool,
            principal,
            "ORDER BY lc.created_at DESC, lc.id DESC",
        )
        .await?)
    }

    async fn update_notes(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        notes: String,
    ) -> Result<Option<LegalCase>, LegalCaseError> {
        self.set_scoped_column(principal, id, "notes", &notes).await
    }

    async fn update(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        command: UpdateLegalCaseCommand,
    ) -> Result<Option<LegalCase>, LegalCaseError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let Some(mut case) =
            fetch_scoped::<LegalCaseScope, _>(&mut *tx, principal, id, true).await?
        else {
            return Ok(None);
        };
        case.apply(command)?;

        sqlx::query(
            r#"
            UPDATE legal_cases
            SET title = $2, case_number = $3, case_type = $4, priority = $5,
                description = $6, start_date = $7, end_date = $8
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(case.title.as_str())
        .bind(&case.case_number)
        .bind(case.case_type.as_str())
        .bind(case.priority.as_str())
        .bind(&case.description)
        .bind(case.start_date)
        .bind(case.end_date)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(Some(case))
    }

    async fn update_status(
        &self,
        principal: &Principal,
        id: LegalCaseId,
        status: CaseStatus,
    ) -> Result<Option<LegalCase>, LegalCaseError> {
        self.set_scoped_column(principal, id, "status", status.as_str())
            .await
    }

    async fn delete(
        &self,
        principal: &Principal,
        id: LegalCaseId,
    ) -> Result<bool, LegalCaseError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        if fetch_scoped::<LegalCaseScope, _>(&mut *tx, principal, id, true)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let has_files = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM legal_case_x_files WHERE legal_case_id = $1)",
        )
        .bind(id.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        if has_files {
            return Err(LegalCaseError::HasFiles(id));
        }

        sqlx::query("DELETE FROM legal_cases WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(true)
    }
}
