use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::ScopedResource;
use crate::domain::user::models::Principal;

/// Scoped reads for one resource type.
#[async_trait]
pub trait ResourceScope<R>: Send + Sync + 'static
where
    R: ScopedResource,
{
    /// Fetch the resource only if the principal is entitled to it.
    ///
    /// Existence and entitlement are checked by one query, so a row that
    /// exists but belongs to someone else is indistinguishable from a missing
    /// one.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn fetch_scoped(&self, principal: &Principal, id: R::Id)
        -> Result<Option<R>, AccessError>;

    /// Account-agnostic existence probe.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists(&self, id: R::Id) -> Result<bool, AccessError>;
}
