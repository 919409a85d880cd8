//! Data access boundaries for users and orders.
//!
//! Lookups that find nothing return `Ok(None)` (or `false` for deletes);
//! only genuine persistence failures surface as [`DatabaseError`].

mod order;
mod user;

pub use order::PgOrderRepository;
pub use user::PgUserRepository;

use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{NewOrder, NewUser, Order, User, UserFilter, UserUpdate};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// One page of users matching the filter, plus the filtered total
    async fn list(&self, filter: UserFilter) -> Result<(Vec<User>, i64), DatabaseError>;

    /// Returns `None` when no row has the given id
    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, DatabaseError>;

    /// Returns `false` when no row has the given id
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: NewOrder) -> Result<Order, DatabaseError>;

    /// Orders for one user, newest first
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>, DatabaseError>;
}
