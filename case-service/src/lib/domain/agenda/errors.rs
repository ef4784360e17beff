use thiserror::Error;

use crate::domain::access::errors::AccessError;

/// Error for EventName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventNameError {
    #[error("Event name is empty")]
    Empty,

    #[error("Event name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all agenda operations
#[derive(Debug, Clone, Error)]
pub enum AgendaError {
    #[error("Invalid event name: {0}")]
    InvalidEventName(#[from] EventNameError),

    #[error("Event description is empty")]
    EmptyDescription,

    #[error("Filter start date is after its end date")]
    InvalidDateRange,

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AgendaError {
    fn from(err: anyhow::Error) -> Self {
        AgendaError::Unknown(err.to_string())
    }
}
