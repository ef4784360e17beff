use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::access::models::ResourceKind;
use crate::domain::access::models::ScopedResource;
use crate::domain::ids::AccountId;
use crate::domain::ids::ClientId;
use crate::domain::ids::InvoiceId;
use crate::domain::ids::UserId;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::errors::InvoiceItemError;

/// Invoice aggregate with its line items.
///
/// Scoped to the issuing user inside the issuing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: i32,
    pub invoice_year: i32,
    pub account_id: AccountId,
    pub client_id: ClientId,
    pub issued_by: UserId,
    pub emission_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub items: Vec<InvoiceItem>,
}

impl ScopedResource for Invoice {
    type Id = InvoiceId;
    const KIND: ResourceKind = ResourceKind::Invoice;
}

impl Invoice {
    /// Sum of hours worked times hourly rate over all items, in cents.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(InvoiceItem::subtotal_cents).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceItem {
    pub description: String,
    pub hours_worked: i32,
    pub hourly_rate_cents: i64,
}

impl InvoiceItem {
    /// # Errors
    /// * `EmptyDescription` - Blank description
    /// * `NegativeHours` / `NegativeRate` - Negative amounts
    pub fn new(
        description: String,
        hours_worked: i32,
        hourly_rate_cents: i64,
    ) -> Result<Self, InvoiceItemError> {
        if description.trim().is_empty() {
            return Err(InvoiceItemError::EmptyDescription);
        }
        if hours_worked < 0 {
            return Err(InvoiceItemError::NegativeHours);
        }
        if hourly_rate_cents < 0 {
            return Err(InvoiceItemError::NegativeRate);
        }
        Ok(Self {
            description,
            hours_worked,
            hourly_rate_cents,
        })
    }

    pub fn subtotal_cents(&self) -> i64 {
        i64::from(self.hours_worked) * self.hourly_rate_cents
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Due,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Due => "due",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due" => Ok(InvoiceStatus::Due),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(InvoiceError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to issue an invoice to a client of the principal's account.
#[derive(Debug, Clone)]
pub struct CreateInvoiceCommand {
    pub client_id: ClientId,
    pub due_date: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
}

/// Invoice row to insert. The repository assigns id and number.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub account_id: AccountId,
    pub client_id: ClientId,
    pub issued_by: UserId,
    pub emission_date: DateTime<Utc>,
    pub invoice_year: i32,
    pub due_date: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
}

impl NewInvoice {
    pub fn into_invoice(self, id: InvoiceId, invoice_number: i32) -> Invoice {
        Invoice {
            id,
            invoice_number,
            invoice_year: self.invoice_year,
            account_id: self.account_id,
            client_id: self.client_id,
            issued_by: self.issued_by,
            emission_date: self.emission_date,
            due_date: self.due_date,
            status: InvoiceStatus::Due,
            items: self.items,
        }
    }
}
