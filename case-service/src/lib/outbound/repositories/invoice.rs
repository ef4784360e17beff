use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::scope::fetch_scoped;
use super::scope::fetch_visible;
use super::scope::PgQuery;
use super::scope::ScopePolicy;
use crate::domain::access::errors::AccessError;
use crate::domain::ids::AccountId;
use crate::domain::ids::ClientId;
use crate::domain::ids::InvoiceId;
use crate::domain::ids::UserId;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::models::Invoice;
use crate::domain::invoice::models::InvoiceItem;
use crate::domain::invoice::models::InvoiceStatus;
use crate::domain::invoice::models::NewInvoice;
use crate::domain::invoice::numbering::next_invoice_number;
use crate::domain::invoice::ports::InvoiceRepository;
use crate::domain::user::models::Principal;

/// Invoices are visible to their issuer, inside the issuer's account.
///
/// Items come back as parallel arrays ordered by item id.
pub struct InvoiceScope;

impl ScopePolicy for InvoiceScope {
    type Resource = Invoice;

    const SELECT: &'static str = r#"
        SELECT i.id, i.invoice_number, i.invoice_year, i.account_id, i.client_id,
               i.issued_by_user_id, i.emission_date, i.due_date, i.status,
               ARRAY(SELECT it.description FROM invoice_items it
                     WHERE it.invoice_id = i.id ORDER BY it.id) AS item_descriptions,
               ARRAY(SELECT it.hours_worked FROM invoice_items it
                     WHERE it.invoice_id = i.id ORDER BY it.id) AS item_hours,
               ARRAY(SELECT it.hourly_rate_cents FROM invoice_items it
                     WHERE it.invoice_id = i.id ORDER BY it.id) AS item_rates
        FROM invoices i
    "#;

    const MEMBERSHIP: &'static str = "i.account_id = $1 AND i.issued_by_user_id = $2";

    const ID_PREDICATE: &'static str = "i.id = $3";

    const LOCK_CLAUSE: &'static str = "FOR UPDATE OF i";

    const EXISTS: &'static str = "SELECT 1 FROM invoices WHERE id = $1";

    fn bind_id<'q>(query: PgQuery<'q>, id: InvoiceId) -> PgQuery<'q> {
        query.bind(id.as_i64())
    }

    fn from_row(row: &PgRow) -> Result<Invoice, AccessError> {
        row_to_invoice(row).map_err(|e| AccessError::DatabaseError(e.to_string()))
    }
}

fn row_to_invoice(r: &PgRow) -> Result<Invoice, InvoiceError> {
    let descriptions: Vec<String> = r.get("item_descriptions");
    let hours: Vec<i32> = r.get("item_hours");
    let rates: Vec<i64> = r.get("item_rates");

    let items = descriptions
        .into_iter()
        .zip(hours)
        .zip(rates)
        .map(|((description, hours_worked), rate)| InvoiceItem::new(description, hours_worked, rate))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Invoice {
        id: InvoiceId(r.get("id")),
        invoice_number: r.get("invoice_number"),
        invoice_year: r.get("invoice_year"),
        account_id: AccountId(r.get("account_id")),
        client_id: ClientId(r.get("client_id")),
        issued_by: UserId(r.get("issued_by_user_id")),
        emission_date: r.get("emission_date"),
        due_date: r.get("due_date"),
        status: r.get::<String, _>("status").parse::<InvoiceStatus>()?,
        items,
    })
}

fn database_error(e: sqlx::Error) -> InvoiceError {
    InvoiceError::DatabaseError(e.to_string())
}

pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn create_numbered(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // One writer per account and year computes the next number at a time.
        sqlx::query(
            "SELECT pg_advisory_xact_lock(hashtextextended(format('invoices:%s:%s', $1::BIGINT, $2::INTEGER), 0))",
        )
        .bind(invoice.account_id.as_i64())
        .bind(invoice.invoice_year)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        let client_linked = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM account_x_clients
                WHERE account_id = $1 AND client_id = $2
            )
            "#,
        )
        .bind(invoice.account_id.as_i64())
        .bind(invoice.client_id.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        if !client_linked {
            return Err(InvoiceError::ClientNotFound(invoice.client_id));
        }

        let max_in_year: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(invoice_number) FROM invoices WHERE account_id = $1 AND invoice_year = $2",
        )
        .bind(invoice.account_id.as_i64())
        .bind(invoice.invoice_year)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        let number = next_invoice_number(max_in_year, invoice.invoice_year)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO invoices (invoice_number, invoice_year, account_id, client_id,
                                  issued_by_user_id, emission_date, due_date, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(number)
        .bind(invoice.invoice_year)
        .bind(invoice.account_id.as_i64())
        .bind(invoice.client_id.as_i64())
        .bind(invoice.issued_by.as_i64())
        .bind(invoice.emission_date)
        .bind(invoice.due_date)
        .bind(InvoiceStatus::Due.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("invoices_account_year_number_key")
                {
                    return InvoiceError::NumberTaken {
                        year: invoice.invoice_year,
                        number,
                    };
                }
            }
            InvoiceError::DatabaseError(e.to_string())
        })?;

        for item in &invoice.items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, description, hours_worked, hourly_rate_cents)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(id)
            .bind(&item.description)
            .bind(item.hours_worked)
            .bind(item.hourly_rate_cents)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;
        }

        tx.commit().await.map_err(database_error)?;

        Ok(invoice.into_invoice(InvoiceId(id), number))
    }

    async fn list_for_issuer(&self, principal: &Principal) -> Result<Vec<Invoice>, InvoiceError> {
        Ok(fetch_visible::<InvoiceScope, _>(
            &self.pool,
            principal,
            "ORDER BY i.emission_date DESC, i.id DESC",
        )
        .await?)
    }

    async fn update_status(
        &self,
        principal: &Principal,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, InvoiceError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let Some(mut invoice) =
            fetch_scoped::<InvoiceScope, _>(&mut *tx, principal, id, true).await?
        else {
            return Ok(None);
        };

        sqlx::query("UPDATE invoices SET status = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        invoice.status = status;
        Ok(Some(invoice))
    }

    async fn delete(&self, principal: &Principal, id: InvoiceId) -> Result<bool, InvoiceError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        if fetch_scoped::<InvoiceScope, _>(&mut *tx, principal, id, true)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(true)
    }
}
