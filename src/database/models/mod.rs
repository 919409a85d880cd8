pub mod order;
pub mod user;

pub use order::{NewOrder, Order};
pub use user::{NewUser, User, UserFilter, UserUpdate};
