use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::client::ports::ClientRepository;
use crate::domain::ids::AccountId;
use crate::domain::ids::ClientId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;

pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_client(r: &PgRow) -> Result<Client, ClientError> {
        Ok(Client {
            id: ClientId(r.get("id")),
            first_name: PersonName::new(r.get("first_name"))?,
            last_name: PersonName::new(r.get("last_name"))?,
            email: EmailAddress::new(r.get("email"))?,
            national_id: NationalId::new(r.get("national_id"))?,
            phone: r
                .get::<Option<String>, _>("phone")
                .map(PhoneNumber::new)
                .transpose()?,
            address: r.get("address"),
        })
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn find_by_national_id(
        &self,
        account_id: AccountId,
        national_id: &NationalId,
    ) -> Result<Option<Client>, ClientError> {
        let row = sqlx::query(
            r#"
            SELECT c.id, c.first_name, c.last_name, c.email, c.national_id, c.phone, c.address
            FROM clients c
            JOIN account_x_clients ac ON ac.client_id = c.id
            WHERE ac.account_id = $1 AND c.national_id = $2
            "#,
        )
        .bind(account_id.as_i64())
        .bind(national_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ClientError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_client).transpose()
    }
}
