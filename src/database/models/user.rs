use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row from the `users` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for inserting a user; id and timestamps come from the database
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub password_hash: String,
}

/// Mutable profile fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Age range and paging window for listing users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub offset: i64,
    pub limit: i64,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.min_age.map_or(true, |min| user.age >= min)
            && self.max_age.map_or(true, |max| user.age <= max)
    }
}
