pub mod create_invoice;
pub mod delete_invoice;
pub mod get_invoice;
pub mod list_invoices;
pub mod update_invoice_status;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

pub use create_invoice::create_invoice;
pub use delete_invoice::delete_invoice;
pub use get_invoice::get_invoice;
pub use list_invoices::list_invoices;
pub use update_invoice_status::update_invoice_status;

use crate::domain::ids::ClientId;
use crate::domain::ids::InvoiceId;
use crate::domain::ids::UserId;
use crate::domain::invoice::models::Invoice;
use crate::domain::invoice::models::InvoiceItem;

/// Amounts are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceData {
    pub id: InvoiceId,
    pub invoice_number: i32,
    pub invoice_year: i32,
    pub client_id: ClientId,
    pub issued_by: UserId,
    pub emission_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: String,
    pub items: Vec<InvoiceItemData>,
    pub total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceItemData {
    pub description: String,
    pub hours_worked: i32,
    pub hourly_rate_cents: i64,
    pub subtotal_cents: i64,
}

impl From<&InvoiceItem> for InvoiceItemData {
    fn from(item: &InvoiceItem) -> Self {
        Self {
            description: item.description.clone(),
            hours_worked: item.hours_worked,
            hourly_rate_cents: item.hourly_rate_cents,
            subtotal_cents: item.subtotal_cents(),
        }
    }
}

impl From<&Invoice> for InvoiceData {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            invoice_year: invoice.invoice_year,
            client_id: invoice.client_id,
            issued_by: invoice.issued_by,
            emission_date: invoice.emission_date,
            due_date: invoice.due_date,
            status: invoice.status.as_str().to_string(),
            items: invoice.items.iter().map(InvoiceItemData::from).collect(),
            total_cents: invoice.total_cents(),
        }
    }
}
