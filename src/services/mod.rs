//! Business rules between the handlers and the repositories.
//!
//! Services are stateless apart from their repository handles. They decide
//! *what* went wrong ([`ServiceError`]); only handlers decide which HTTP
//! status that becomes.

pub mod auth_service;
pub mod order_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use order_service::OrderService;
pub use user_service::{ListUsersParams, UserPage, UserService};

use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::auth::TokenError;
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("email already exists")]
    EmailExists,

    #[error("user not found")]
    UserNotFound,

    #[error("user not found for order")]
    OrderUserNotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("database error: {0}")]
    Database(DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            // Lost a race with a concurrent insert of the same email
            DatabaseError::UniqueViolation(_) => ServiceError::EmailExists,
            other => ServiceError::Database(other),
        }
    }
}
