use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Account row, including the password hash. Never render this directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Input for sign-up. `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password: String,
}
