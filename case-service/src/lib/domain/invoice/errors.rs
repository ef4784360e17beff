use thiserror::Error;

use crate::domain::access::errors::AccessError;
use crate::domain::ids::ClientId;
use crate::domain::ids::IdError;

/// Error for invoice line item validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvoiceItemError {
    #[error("Invoice must contain at least one item")]
    NoItems,

    #[error("Item description is empty")]
    EmptyDescription,

    #[error("Hours worked must not be negative")]
    NegativeHours,

    #[error("Hourly rate must not be negative")]
    NegativeRate,

    #[error("Invoice total overflows")]
    TotalOverflow,
}

/// Top-level error for all invoice operations
#[derive(Debug, Clone, Error)]
pub enum InvoiceError {
    #[error("Invalid invoice ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Invalid invoice item: {0}")]
    InvalidItem(#[from] InvoiceItemError),

    #[error("Unknown invoice status: {0}")]
    InvalidStatus(String),

    #[error("Due date precedes emission date")]
    DueBeforeEmission,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Client not found in account: {0}")]
    ClientNotFound(ClientId),

    /// Another writer took the number between read and insert.
    #[error("Invoice number {number} already taken for {year}")]
    NumberTaken { year: i32, number: i32 },

    #[error("Could not allocate an invoice number after {attempts} attempts")]
    NumberingContention { attempts: u32 },

    #[error("Invoice number sequence exhausted for {0}")]
    SequenceExhausted(i32),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for InvoiceError {
    fn from(err: anyhow::Error) -> Self {
        InvoiceError::Unknown(err.to_string())
    }
}
