use async_trait::async_trait;

use crate::domain::ids::InvoiceId;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::models::CreateInvoiceCommand;
use crate::domain::invoice::models::Invoice;
use crate::domain::invoice::models::InvoiceStatus;
use crate::domain::invoice::models::NewInvoice;
use crate::domain::user::models::Principal;

/// Port for invoice domain service operations.
#[async_trait]
pub trait InvoiceServicePort: Send + Sync + 'static {
    /// Issue an invoice with the next number of the current year.
    ///
    /// # Errors
    /// * `InvalidItem` - No items or invalid amounts
    /// * `DueBeforeEmission` - Due date lies in the past
    /// * `ClientNotFound` - Client is not linked to the principal's account
    /// * `NumberingContention` - Retries exhausted under contention; safe to retry
    /// * `DatabaseError` - Database operation failed
    async fn create_invoice(
        &self,
        principal: &Principal,
        command: CreateInvoiceCommand,
    ) -> Result<Invoice, InvoiceError>;

    async fn get_invoice(
        &self,
        principal: &Principal,
        id: InvoiceId,
    ) -> Result<Invoice, InvoiceError>;

    /// Invoices issued by the principal, newest first.
    async fn list_invoices(&self, principal: &Principal) -> Result<Vec<Invoice>, InvoiceError>;

    async fn update_status(
        &self,
        principal: &Principal,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> Result<Invoice, InvoiceError>;

    /// Delete an invoice together with its items.
    async fn delete_invoice(&self, principal: &Principal, id: InvoiceId)
        -> Result<(), InvoiceError>;
}

/// Persistence operations for invoices.
#[async_trait]
pub trait InvoiceRepository: Send + Sync + 'static {
    /// Allocate the next number of `invoice.invoice_year` and insert the
    /// invoice with its items, atomically.
    ///
    /// # Errors
    /// * `ClientNotFound` - Client is not linked to the invoice's account
    /// * `NumberTaken` - Uniqueness violated by a concurrent writer
    /// * `DatabaseError` - Database operation failed
    async fn create_numbered(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError>;

    async fn list_for_issuer(&self, principal: &Principal) -> Result<Vec<Invoice>, InvoiceError>;

    /// Returns `None` when the invoice is not visible to the principal.
    async fn update_status(
        &self,
        principal: &Principal,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> Result<Option<Invoice>, InvoiceError>;

    /// Returns `true` when the invoice was deleted.
    async fn delete(&self, principal: &Principal, id: InvoiceId) -> Result<bool, InvoiceError>;
}
