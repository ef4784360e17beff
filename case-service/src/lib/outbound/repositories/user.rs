use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::models::AccountStatus;
use crate::domain::ids::AccountId;
use crate::domain::ids::RoleId;
use crate::domain::ids::UserId;
use crate::domain::user::models::City;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCandidate;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::Principal;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = r#"
    u.id, u.username, u.national_id, u.email, u.first_name, u.last_name,
    u.phone, u.city, u.password_hash, u.status, u.role_id, u.account_id, u.created_at
"#;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(r: &PgRow) -> Result<User, UserError> {
        Ok(User {
            id: UserId(r.get("id")),
            username: Username::new(r.get("username"))?,
            national_id: NationalId::new(r.get("national_id"))?,
            email: EmailAddress::new(r.get("email"))?,
            first_name: PersonName::new(r.get("first_name"))?,
            last_name: PersonName::new(r.get("last_name"))?,
            phone: r
                .get::<Option<String>, _>("phone")
                .map(PhoneNumber::new)
                .transpose()?,
            city: r
                .get::<Option<String>, _>("city")
                .map(City::new)
                .transpose()?,
            password_hash: r.get("password_hash"),
            status: r
                .get::<String, _>("status")
                .parse::<UserStatus>()
                .map_err(|e| UserError::Unknown(e.to_string()))?,
            role_id: RoleId(r.get("role_id")),
            account_id: AccountId(r.get("account_id")),
            created_at: r.get("created_at"),
        })
    }

    fn row_to_principal(r: &PgRow) -> Result<Principal, UserError> {
        Ok(Principal {
            user_id: UserId(r.get("id")),
            username: Username::new(r.get("username"))?,
            account_id: AccountId(r.get("account_id")),
            account_status: r
                .get::<String, _>("account_status")
                .parse::<AccountStatus>()
                .map_err(|e| UserError::Unknown(e.to_string()))?,
            role_id: RoleId(r.get("role_id")),
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users AS u (username, national_id, email, first_name, last_name,
                                    password_hash, status, role_id, account_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username.as_str())
        .bind(user.national_id.as_str())
        .bind(user.email.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(&user.password_hash)
        .bind(user.status.as_str())
        .bind(user.role_id.as_i64())
        .bind(user.account_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    match db_err.constraint() {
                        Some("users_username_key") => {
                            return UserError::UsernameAlreadyExists(
                                user.username.as_str().to_string(),
                            );
                        }
                        Some("users_national_id_key") => {
                            return UserError::NationalIdAlreadyExists(
                                user.national_id.as_str().to_string(),
                            );
                        }
                        Some("users_email_key") => {
                            return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                        }
                        _ => {}
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Self::row_to_user(&row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            WHERE u.id = $1
            "#
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_login_candidate(
        &self,
        username: &Username,
    ) -> Result<Option<LoginCandidate>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.account_id, u.role_id, u.password_hash,
                   a.status AS account_status
            FROM users u
            JOIN accounts a ON a.id = u.account_id
            WHERE u.username = $1
              AND u.status = 'active'
              AND a.status <> 'deleted'
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(LoginCandidate {
                principal: Self::row_to_principal(&r)?,
                password_hash: r.get("password_hash"),
            })),
            None => Ok(None),
        }
    }

    async fn find_principal(&self, id: &UserId) -> Result<Option<Principal>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.account_id, u.role_id, a.status AS account_status
            FROM users u
            JOIN accounts a ON a.id = u.account_id
            WHERE u.id = $1 AND u.status = 'active'
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_principal).transpose()
    }

    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS},
                   r.name AS role_name,
                   a.email AS account_email,
                   s.plan_name AS subscription_plan
            FROM users u
            JOIN roles r ON r.id = u.role_id
            JOIN accounts a ON a.id = u.account_id
            JOIN subscriptions s ON s.id = a.subscription_id
            WHERE u.id = $1
            "#
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(UserProfile {
                user: Self::row_to_user(&r)?,
                role_name: r.get("role_name"),
                account_email: r.get("account_email"),
                subscription_plan: r.get("subscription_plan"),
            })),
            None => Ok(None),
        }
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: String,
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(*id));
        }

        Ok(())
    }

    async fn update_profile(&self, user: &User) -> Result<User, UserError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users AS u
            SET email = $2, first_name = $3, last_name = $4, phone = $5, city = $6
            WHERE u.id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.as_i64())
        .bind(user.email.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.phone.as_ref().map(|p| p.as_str()))
        .bind(user.city.as_ref().map(|c| c.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        match row {
            Some(r) => Self::row_to_user(&r),
            None => Err(UserError::NotFound(user.id)),
        }
    }

    async fn role_exists(&self, id: &RoleId) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM roles WHERE id = $1)")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}
