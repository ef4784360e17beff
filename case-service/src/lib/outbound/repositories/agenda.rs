use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::scope::fetch_scoped;
use super::scope::PgQuery;
use super::scope::ScopePolicy;
use crate::domain::access::errors::AccessError;
use crate::domain::agenda::errors::AgendaError;
use crate::domain::agenda::models::Agenda;
use crate::domain::agenda::models::AgendaFilter;
use crate::domain::agenda::models::CreateAgendaCommand;
use crate::domain::agenda::models::EventName;
use crate::domain::agenda::models::UpdateAgendaCommand;
use crate::domain::agenda::ports::AgendaRepository;
use crate::domain::ids::AccountId;
use crate::domain::ids::AgendaId;
use crate::domain::ids::UserId;
use crate::domain::user::models::Principal;

/// Agenda events are private to their owner, inside the owner's account.
pub struct AgendaScope;

impl ScopePolicy for AgendaScope {
    type Resource = Agenda;

    const SELECT: &'static str = r#"
        SELECT a.id, a.event_name, a.description, a.due_date, a.tags, a.account_id, a.user_id
        FROM agendas a
    "#;

    const MEMBERSHIP: &'static str = "a.account_id = $1 AND a.user_id = $2";

    const ID_PREDICATE: &'static str = "a.id = $3";

    const LOCK_CLAUSE: &'static str = "FOR UPDATE";

    const EXISTS: &'static str = "SELECT 1 FROM agendas WHERE id = $1";

    fn bind_id<'q>(query: PgQuery<'q>, id: AgendaId) -> PgQuery<'q> {
        query.bind(id.as_i64())
    }

    fn from_row(row: &PgRow) -> Result<Agenda, AccessError> {
        row_to_agenda(row).map_err(|e| AccessError::DatabaseError(e.to_string()))
    }
}

fn row_to_agenda(r: &PgRow) -> Result<Agenda, AgendaError> {
    Ok(Agenda {
        id: AgendaId(r.get("id")),
        event_name: EventName::new(r.get("event_name"))?,
        description: r.get("description"),
        due_date: r.get("due_date"),
        tags: r.get("tags"),
        account_id: AccountId(r.get("account_id")),
        user_id: UserId(r.get("user_id")),
    })
}

fn database_error(e: sqlx::Error) -> AgendaError {
    AgendaError::DatabaseError(e.to_string())
}

/// `ILIKE` pattern matching `query` as a literal substring.
fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct PostgresAgendaRepository {
    pool: PgPool,
}

impl PostgresAgendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgendaRepository for PostgresAgendaRepository {
    async fn create(
        &self,
        principal: &Principal,
        command: CreateAgendaCommand,
    ) -> Result<Agenda, AgendaError> {
        let row = sqlx::query(
            r#"
            INSERT INTO agendas (event_name, description, due_date, tags, account_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, event_name, description, due_date, tags, account_id, user_id
            "#,
        )
        .bind(command.event_name.as_str())
        .bind(&command.description)
        .bind(command.due_date)
        .bind(&command.tags)
        .bind(principal.account_id.as_i64())
        .bind(principal.user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        row_to_agenda(&row)
    }

    async fn list(
        &self,
        principal: &Principal,
        filter: &AgendaFilter,
    ) -> Result<Vec<Agenda>, AgendaError> {
        let rows = sqlx::query(&format!(
            r#"
            {select}
            WHERE {membership}
              AND ($3::TIMESTAMPTZ IS NULL OR a.due_date >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR a.due_date <= $4)
              AND ($5::TEXT IS NULL OR a.event_name ILIKE $5 OR a.description ILIKE $5)
              AND a.tags @> $6::TEXT[]
            ORDER BY a.due_date ASC NULLS LAST, a.id ASC
            "#,
            select = AgendaScope::SELECT,
            membership = AgendaScope::MEMBERSHIP,
        ))
        .bind(principal.account_id.as_i64())
        .bind(principal.user_id.as_i64())
        .bind(filter.date_from)
        .bind(filter.date_to)
        .bind(filter.query.as_deref().map(contains_pattern))
        .bind(&filter.tags)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(row_to_agenda).collect()
    }

    async fn update(
        &self,
        principal: &Principal,
        id: AgendaId,
        command: UpdateAgendaCommand,
    ) -> Result<Option<Agenda>, AgendaError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let Some(mut event) = fetch_scoped::<AgendaScope, _>(&mut *tx, principal, id, true).await?
        else {
            return Ok(None);
        };
        event.apply(command);

        sqlx::query(
            r#"
            UPDATE agendas
            SET event_name = $2, description = $3, due_date = $4, tags = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(event.event_name.as_str())
        .bind(&event.description)
        .bind(event.due_date)
        .bind(&event.tags)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(Some(event))
    }

    async fn delete(&self, principal: &Principal, id: AgendaId) -> Result<bool, AgendaError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        if fetch_scoped::<AgendaScope, _>(&mut *tx, principal, id, true)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        sqlx::query("DELETE FROM agendas WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("court"), "%court%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
