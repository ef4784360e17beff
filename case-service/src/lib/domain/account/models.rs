use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error for AccountStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown account status: {0}")]
pub struct AccountStatusError(String);

/// Billing lifecycle of a tenant.
///
/// A deleted account is soft-deleted: its rows stay, but no principal of it
/// may pass an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Running,
    Deleted,
    PaymentDue,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Running => "running",
            AccountStatus::Deleted => "deleted",
            AccountStatus::PaymentDue => "payment_due",
        }
    }

    /// Whether principals of this account may access resources at all.
    pub fn permits_access(&self) -> bool {
        !matches!(self, AccountStatus::Deleted)
    }
}

impl FromStr for AccountStatus {
    type Err = AccountStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(AccountStatus::Running),
            "deleted" => Ok(AccountStatus::Deleted),
            "payment_due" => Ok(AccountStatus::PaymentDue),
            other => Err(AccountStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate stored bytes of an account against its subscription ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageQuota {
    pub used_bytes: i64,
    pub limit_bytes: i64,
}

impl StorageQuota {
    /// Check whether `additional_bytes` more still fit under the ceiling.
    ///
    /// Reaching the ceiling exactly is allowed.
    pub fn admits(&self, additional_bytes: i64) -> bool {
        if additional_bytes < 0 {
            return false;
        }
        self.used_bytes
            .checked_add(additional_bytes)
            .map_or(false, |total| total <= self.limit_bytes)
    }

    /// Bytes left before the ceiling is reached.
    pub fn remaining_bytes(&self) -> i64 {
        (self.limit_bytes - self.used_bytes).max(0)
    }
}
