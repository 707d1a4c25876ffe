use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

/// Data for a user about to be persisted. The id is assigned by the database
/// and `confirmed` always starts out false.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
    pub phone_number: Option<String>,
}

/// Lookup and persistence capabilities the auth core needs from storage.
///
/// Every method suspends on a database round trip. Object-safe so services can
/// hold an `Arc<dyn UserStore>` and tests can substitute an in-memory store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError>;
    async fn insert(&self, new_user: NewUser) -> Result<User, AppError>;
}

/// Postgres-backed implementation of [`UserStore`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, phone_number, hashed_password, confirmed";

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE phone_number = $1",
            USER_COLUMNS
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AppError> {
        // The unique constraints on email and phone_number are the final
        // arbiter when two signups race past the service-level pre-checks.
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, hashed_password, phone_number, confirmed)
             VALUES ($1, $2, $3, FALSE)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&new_user.email)
        .bind(&new_user.hashed_password)
        .bind(&new_user.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(translate_unique_violation)
    }
}

/// Maps a Postgres unique-constraint violation (23505) on the users table to
/// the same `Conflict` the pre-checks would have produced, keyed on which
/// constraint fired. Other errors pass through the normal conversion.
fn translate_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let message = match db_err.constraint() {
                Some(constraint) if constraint.contains("phone") => {
                    "A user with that phone number already exists"
                }
                _ => "A user with that email already exists",
            };
            return AppError::Conflict(message.into());
        }
    }
    err.into()
}
