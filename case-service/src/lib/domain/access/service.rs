use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::ScopedResource;
use crate::domain::access::ports::ResourceScope;
use crate::domain::user::models::Principal;

/// Authorizes a principal against one resource type.
///
/// The scoped fetch decides visibility. When it misses, the existence probe
/// decides between `NotFound` and `Forbidden`:
/// * row absent: `NotFound`
/// * row present but not reachable through the principal's edges: `Forbidden`
pub struct AccessScoper<R, S>
where
    R: ScopedResource,
    S: ResourceScope<R>,
{
    scope: Arc<S>,
    _resource: PhantomData<fn() -> R>,
}

impl<R, S> AccessScoper<R, S>
where
    R: ScopedResource,
    S: ResourceScope<R>,
{
    pub fn new(scope: Arc<S>) -> Self {
        Self {
            scope,
            _resource: PhantomData,
        }
    }

    /// Fetch a resource on behalf of `principal`.
    ///
    /// # Errors
    /// * `AccountInactive` - Principal's account is deleted
    /// * `Forbidden` - Row exists outside the principal's scope
    /// * `NotFound` - Row does not exist
    /// * `DatabaseError` - Database operation failed
    pub async fn fetch(&self, principal: &Principal, id: R::Id) -> Result<R, AccessError> {
        ensure_active(principal)?;

        match self.scope.fetch_scoped(principal, id).await? {
            Some(resource) => Ok(resource),
            None => Err(self.classify_miss(principal, id).await),
        }
    }

    /// Turn a scoped miss into `NotFound` or `Forbidden`.
    ///
    /// Mutation paths that run their own scoped fetch inside a transaction
    /// call this after the transaction reports a miss.
    pub async fn classify_miss(&self, principal: &Principal, id: R::Id) -> AccessError {
        match self.scope.exists(id).await {
            Ok(true) => {
                tracing::warn!(
                    user_id = %principal.user_id,
                    account_id = %principal.account_id,
                    resource = %R::KIND,
                    id = %id,
                    "Access denied"
                );
                AccessError::forbidden(R::KIND, id)
            }
            Ok(false) => AccessError::not_found(R::KIND, id),
            Err(e) => e,
        }
    }

    /// Account-agnostic existence probe.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    pub async fn exists(&self, id: R::Id) -> Result<bool, AccessError> {
        self.scope.exists(id).await
    }
}

/// Reject principals whose account is soft-deleted before touching storage.
pub fn ensure_active(principal: &Principal) -> Result<(), AccessError> {
    if principal.account_status.permits_access() {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %principal.user_id,
            account_id = %principal.account_id,
            status = %principal.account_status,
            "Access attempted from inactive account"
        );
        Err(AccessError::AccountInactive(principal.account_id))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::domain::access::models::ResourceKind;
    use crate::domain::account::models::AccountStatus;
    use crate::domain::ids::AccountId;
    use crate::domain::ids::LegalCaseId;
    use crate::domain::ids::RoleId;
    use crate::domain::ids::UserId;
    use crate::domain::user::models::Username;

    #[derive(Debug, Clone, PartialEq)]
    struct Dossier {
        id: LegalCaseId,
        account_id: AccountId,
        members: Vec<UserId>,
    }

    impl ScopedResource for Dossier {
        type Id = LegalCaseId;
        const KIND: ResourceKind = ResourceKind::LegalCase;
    }

    mock! {
        pub TestScope {}

        #[async_trait]
        impl ResourceScope<Dossier> for TestScope {
            async fn fetch_scoped(&self, principal: &Principal, id: LegalCaseId) -> Result<Option<Dossier>, AccessError>;
            async fn exists(&self, id: LegalCaseId) -> Result<bool, AccessError>;
        }
    }

    fn principal(user_id: i64, account_id: i64) -> Principal {
        Principal {
            user_id: UserId(user_id),
            username: Username::new(format!("user{}", user_id)).unwrap(),
            account_id: AccountId(account_id),
            account_status: AccountStatus::Running,
            role_id: RoleId(2),
        }
    }

    /// Case 42 exists in account 1 with member 1. Case 404 does not exist.
    fn scoper() -> AccessScoper<Dossier, MockTestScope> {
        let case = Dossier {
            id: LegalCaseId(42),
            account_id: AccountId(1),
            members: vec![UserId(1)],
        };

        let mut scope = MockTestScope::new();
        scope.expect_fetch_scoped().returning(move |p, id| {
            Ok(Some(case.clone()).filter(|c| {
                c.id == id && c.account_id == p.account_id && c.members.contains(&p.user_id)
            }))
        });
        scope
            .expect_exists()
            .returning(|id| Ok(id == LegalCaseId(42)));

        AccessScoper::new(Arc::new(scope))
    }

    #[tokio::test]
    async fn test_member_fetch_succeeds() {
        let scoper = scoper();

        let case = scoper.fetch(&principal(1, 1), LegalCaseId(42)).await.unwrap();
        assert_eq!(case.id, LegalCaseId(42));
    }

    #[tokio::test]
    async fn test_non_member_is_forbidden_and_absent_is_not_found() {
        let scoper = scoper();
        let outsider = principal(2, 1);

        assert_eq!(
            scoper.fetch(&outsider, LegalCaseId(42)).await,
            Err(AccessError::forbidden(ResourceKind::LegalCase, 42))
        );
        assert_eq!(
            scoper.fetch(&outsider, LegalCaseId(404)).await,
            Err(AccessError::not_found(ResourceKind::LegalCase, 404))
        );
    }

    #[tokio::test]
    async fn test_member_of_other_account_is_forbidden() {
        let scoper = scoper();

        // Same user id, foreign tenant.
        let result = scoper.fetch(&principal(1, 2), LegalCaseId(42)).await;
        assert!(matches!(result, Err(AccessError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_scoped_fetch_miss_is_identical_for_absent_and_foreign() {
        let scoper = scoper();
        let outsider = principal(2, 1);

        let foreign = scoper.scope.fetch_scoped(&outsider, LegalCaseId(42)).await;
        let absent = scoper.scope.fetch_scoped(&outsider, LegalCaseId(404)).await;

        assert_eq!(foreign, Ok(None));
        assert_eq!(foreign, absent);
    }

    #[tokio::test]
    async fn test_deleted_account_rejected_before_query() {
        let mut scope = MockTestScope::new();
        scope.expect_fetch_scoped().times(0);
        scope.expect_exists().times(0);
        let scoper: AccessScoper<Dossier, _> = AccessScoper::new(Arc::new(scope));

        let mut member = principal(1, 1);
        member.account_status = AccountStatus::Deleted;

        let result = scoper.fetch(&member, LegalCaseId(42)).await;
        assert_eq!(result, Err(AccessError::AccountInactive(AccountId(1))));
    }

    #[tokio::test]
    async fn test_probe_failure_surfaces_as_database_error() {
        let mut scope = MockTestScope::new();
        scope.expect_fetch_scoped().returning(|_, _| Ok(None));
        scope
            .expect_exists()
            .returning(|_| Err(AccessError::DatabaseError("pool timed out".to_string())));
        let scoper: AccessScoper<Dossier, _> = AccessScoper::new(Arc::new(scope));

        let result = scoper.fetch(&principal(1, 1), LegalCaseId(42)).await;
        assert!(matches!(result, Err(AccessError::DatabaseError(_))));
    }
}
