pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{NewOrder, NewUser, Order, User, UserFilter, UserUpdate};
pub use repository::{OrderRepository, PgOrderRepository, PgUserRepository, UserRepository};
