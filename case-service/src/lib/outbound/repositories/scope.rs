//! Scoped fetches shared by all protected resources.
//!
//! A [`ScopePolicy`] describes, for one resource type, how to select its rows
//! and which membership predicate makes a row visible to a principal. The
//! read and the authorization are one query: [`fetch_scoped`] returns `None`
//! both for absent rows and for rows outside the principal's scope.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::postgres::PgRow;
use sqlx::query::Query;
use sqlx::PgExecutor;
use sqlx::PgPool;
use sqlx::Postgres;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::ScopedResource;
use crate::domain::access::ports::ResourceScope;
use crate::domain::user::models::Principal;

pub type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// SQL and row mapping of one scoped resource type.
///
/// Placeholders: `$1` is the principal's account, `$2` the principal's user.
/// Identifier placeholders follow, bound in order by [`ScopePolicy::bind_id`].
pub trait ScopePolicy: Send + Sync + 'static {
    type Resource: ScopedResource;

    /// `SELECT ... FROM ...` without a `WHERE` clause.
    const SELECT: &'static str;

    /// Membership predicate over `$1` and `$2`.
    const MEMBERSHIP: &'static str;

    /// Identifier predicate, placeholders starting at `$3`.
    const ID_PREDICATE: &'static str;

    /// Row lock taken by mutations, e.g. `FOR UPDATE OF lc`.
    const LOCK_CLAUSE: &'static str;

    /// Account-agnostic probe returning a row when the identifier exists.
    /// Identifier placeholders start at `$1`.
    const EXISTS: &'static str;

    fn bind_id<'q>(
        query: PgQuery<'q>,
        id: <Self::Resource as ScopedResource>::Id,
    ) -> PgQuery<'q>;

    fn from_row(row: &PgRow) -> Result<Self::Resource, AccessError>;
}

pub(crate) fn database_error(e: sqlx::Error) -> AccessError {
    AccessError::DatabaseError(e.to_string())
}

/// Select every row of `P` visible to `principal`, followed by `tail`
/// (ordering, limits).
pub async fn fetch_visible<'c, P, E>(
    executor: E,
    principal: &Principal,
    tail: &str,
) -> Result<Vec<P::Resource>, AccessError>
where
    P: ScopePolicy,
    E: PgExecutor<'c>,
{
    let sql = format!("{} WHERE {} {}", P::SELECT, P::MEMBERSHIP, tail);

    let rows = sqlx::query(&sql)
        .bind(principal.account_id.as_i64())
        .bind(principal.user_id.as_i64())
        .fetch_all(executor)
        .await
        .map_err(database_error)?;

    rows.iter().map(P::from_row).collect()
}

/// Fetch one resource if, and only if, `principal` is entitled to it.
///
/// With `lock` the row stays locked until the surrounding transaction ends.
pub async fn fetch_scoped<'c, P, E>(
    executor: E,
    principal: &Principal,
    id: <P::Resource as ScopedResource>::Id,
    lock: bool,
) -> Result<Option<P::Resource>, AccessError>
where
    P: ScopePolicy,
    E: PgExecutor<'c>,
{
    let sql = format!(
        "{} WHERE {} AND {} {}",
        P::SELECT,
        P::MEMBERSHIP,
        P::ID_PREDICATE,
        if lock { P::LOCK_CLAUSE } else { "" }
    );

    let query = sqlx::query(&sql)
        .bind(principal.account_id.as_i64())
        .bind(principal.user_id.as_i64());

    let row = P::bind_id(query, id)
        .fetch_optional(executor)
        .await
        .map_err(database_error)?;

    row.as_ref().map(P::from_row).transpose()
}

/// `ResourceScope` adapter over any [`ScopePolicy`].
pub struct PgResourceScope<P>
where
    P: ScopePolicy,
{
    pool: PgPool,
    _policy: PhantomData<fn() -> P>,
}

impl<P> PgResourceScope<P>
where
    P: ScopePolicy,
{
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _policy: PhantomData,
        }
    }
}

#[async_trait]
impl<P> ResourceScope<P::Resource> for PgResourceScope<P>
where
    P: ScopePolicy,
{
    async fn fetch_scoped(
        &self,
        principal: &Principal,
        id: <P::Resource as ScopedResource>::Id,
    ) -> Result<Option<P::Resource>, AccessError> {
        fetch_scoped::<P, _>(&self.pool, principal, id, false).await
    }

    async fn exists(&self, id: <P::Resource as ScopedResource>::Id) -> Result<bool, AccessError> {
        P::bind_id(sqlx::query(P::EXISTS), id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.is_some())
            .map_err(database_error)
    }
}
