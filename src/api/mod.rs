//! Wire types: request bodies with their field constraints, and the JSON
//! shapes returned to clients.

pub mod format;
pub mod requests;

pub use format::{OrderResponse, UserListResponse, UserResponse};
pub use requests::{CreateOrderRequest, CreateUserRequest, FieldError, LoginRequest, UpdateUserRequest};
