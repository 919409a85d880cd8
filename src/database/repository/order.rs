use async_trait::async_trait;
use sqlx::PgPool;

use super::OrderRepository;
use crate::database::manager::DatabaseError;
use crate::database::models::{NewOrder, Order};

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: NewOrder) -> Result<Order, DatabaseError> {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, product, quantity, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, product, quantity, price, created_at
            "#,
        )
        .bind(order.user_id)
        .bind(&order.product)
        .bind(order.quantity)
        .bind(order.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create order in DB: {}", e);
            DatabaseError::from(e)
        })?;

        Ok(created)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>, DatabaseError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, product, quantity, price, created_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders for user_id={}: {}", user_id, e);
            DatabaseError::from(e)
        })?;

        Ok(orders)
    }
}
