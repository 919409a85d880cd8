use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::database::{Order, User};

/// Public view of a user. The password hash has no field here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: i64,
    pub product: String,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            product: order.product,
            quantity: order.quantity,
            price: order.price,
            created_at: order.created_at,
        }
    }
}

/// Body of `GET /users`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserListResponse {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub users: Vec<UserResponse>,
}
