//! Year-scoped invoice numbering.
//!
//! Numbers are unique and strictly increasing within one account and one
//! calendar year. The first invoice of a year gets [`INVOICE_NUMBER_FLOOR`].
//! Computing the next number is a read-then-write; the repository must run it
//! under a per-account, per-year lock in the same transaction as the insert.

use chrono::DateTime;
use chrono::Datelike;
use chrono::Utc;

use crate::domain::invoice::errors::InvoiceError;

pub const INVOICE_NUMBER_FLOOR: i32 = 1000;

/// Next number given the highest number already issued in the year.
///
/// # Errors
/// * `SequenceExhausted` - The year's sequence reached `i32::MAX`
pub fn next_invoice_number(max_in_year: Option<i32>, year: i32) -> Result<i32, InvoiceError> {
    match max_in_year {
        None => Ok(INVOICE_NUMBER_FLOOR),
        Some(max) => max
            .checked_add(1)
            .ok_or(InvoiceError::SequenceExhausted(year)),
    }
}

/// Calendar year (UTC) an invoice emitted at `emission_date` is numbered in.
pub fn numbering_year(emission_date: DateTime<Utc>) -> i32 {
    emission_date.year()
}
