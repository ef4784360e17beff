use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::ports::ResourceScope;
use crate::domain::access::service::ensure_active;
use crate::domain::access::service::AccessScoper;
use crate::domain::ids::InvoiceId;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::errors::InvoiceItemError;
use crate::domain::invoice::models::CreateInvoiceCommand;
use crate::domain::invoice::models::Invoice;
use crate::domain::invoice::models::InvoiceItem;
use crate::domain::invoice::models::InvoiceStatus;
use crate::domain::invoice::models::NewInvoice;
use crate::domain::invoice::numbering::numbering_year;
use crate::domain::invoice::ports::InvoiceRepository;
use crate::domain::invoice::ports::InvoiceServicePort;
use crate::domain::user::models::Principal;

/// Domain service implementation for invoice operations.
pub struct InvoiceService<IR, S>
where
    IR: InvoiceRepository,
    S: ResourceScope<Invoice>,
{
    repository: Arc<IR>,
    scoper: AccessScoper<Invoice, S>,
    max_numbering_attempts: u32,
}

impl<IR, S> InvoiceService<IR, S>
where
    IR: InvoiceRepository,
    S: ResourceScope<Invoice>,
{
    /// # Arguments
    /// * `max_numbering_attempts` - Bound on number allocation retries (at least 1)
    pub fn new(repository: Arc<IR>, scope: Arc<S>, max_numbering_attempts: u32) -> Self {
        Self {
            repository,
            scoper: AccessScoper::new(scope),
            max_numbering_attempts: max_numbering_attempts.max(1),
        }
    }
}

fn validate_items(items: &[InvoiceItem]) -> Result<(), InvoiceItemError> {
    if items.is_empty() {
        return Err(InvoiceItemError::NoItems);
    }
    items
        .iter()
        .try_fold(0i64, |total, item| {
            i64::from(item.hours_worked)
                .checked_mul(item.hourly_rate_cents)
                .and_then(|subtotal| total.checked_add(subtotal))
        })
        .map(|_| ())
        .ok_or(InvoiceItemError::TotalOverflow)
}

#[async_trait]
impl<IR, S> InvoiceServicePort for InvoiceService<IR, S>
where
    IR: InvoiceRepository,
    S: ResourceScope<Invoice>,
{
    async fn create_invoice(
        &self,
        principal: &Principal,
        command: CreateInvoiceCommand,
    ) -> Result<Invoice, InvoiceError> {
        ensure_active(principal)?;
        validate_items(&command.items)?;

        let emission_date = Utc::now();
        if command.due_date < emission_date {
            return Err(InvoiceError::DueBeforeEmission);
        }

        let new_invoice = NewInvoice {
            account_id: principal.account_id,
            client_id: command.client_id,
            issued_by: principal.user_id,
            emission_date,
            invoice_year: numbering_year(emission_date),
            due_date: command.due_date,
            items: command.items,
        };

        for attempt in 1..=self.max_numbering_attempts {
            match self.repository.create_numbered(new_invoice.clone()).await {
                Ok(invoice) => {
                    tracing::info!(
                        invoice_id = %invoice.id,
                        invoice_number = invoice.invoice_number,
                        invoice_year = invoice.invoice_year,
                        account_id = %invoice.account_id,
                        "Invoice issued"
                    );
                    return Ok(invoice);
                }
                Err(InvoiceError::NumberTaken { year, number }) => {
                    tracing::warn!(
                        attempt,
                        year,
                        number,
                        account_id = %principal.account_id,
                        "Invoice number taken concurrently, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = self.max_numbering_attempts,
            account_id = %principal.account_id,
            "Invoice numbering retries exhausted"
        );

        Err(InvoiceError::NumberingContention {
            attempts: self.max_numbering_attempts,
        })
    }

    async fn get_invoice(
        &self,
        principal: &Principal,
        id: InvoiceId,
    ) -> Result<Invoice, InvoiceError> {
        Ok(self.scoper.fetch(principal, id).await?)
    }

    async fn list_invoices(&self, principal: &Principal) -> Result<Vec<Invoice>, InvoiceError> {
        ensure_active(principal)?;
        self.repository.list_for_issuer(principal).await
    }

    async fn update_status(
        &self,
        principal: &Principal,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> Result<Invoice, InvoiceError> {
        ensure_active(principal)?;
        match self.repository.update_status(principal, id, status).await? {
            Some(invoice) => Ok(invoice),
            None => Err(self.scoper.classify_miss(principal, id).await.into()),
        }
    }

    async fn delete_invoice(
        &self,
        principal: &Principal,
        id: InvoiceId,
    ) -> Result<(), InvoiceError> {
        ensure_active(principal)?;
        if self.repository.delete(principal, id).await? {
            tracing::info!(invoice_id = %id, deleted_by = %principal.user_id, "Invoice deleted");
            Ok(())
        } else {
            Err(self.scoper.classify_miss(principal, id).await.into())
        }
    }
}
