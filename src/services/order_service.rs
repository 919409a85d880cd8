use std::sync::Arc;

use tracing::{info, warn};

use super::ServiceError;
use crate::api::CreateOrderRequest;
use crate::database::{NewOrder, Order, OrderRepository, UserRepository};

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { orders, users }
    }

    async fn ensure_user_exists(&self, user_id: i64) -> Result<(), ServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            warn!("Order operation for non-existent user: {}", user_id);
            return Err(ServiceError::OrderUserNotFound);
        }
        Ok(())
    }

    pub async fn create_order(
        &self,
        user_id: i64,
        req: &CreateOrderRequest,
    ) -> Result<Order, ServiceError> {
        self.ensure_user_exists(user_id).await?;

        let order = self
            .orders
            .create(NewOrder {
                user_id,
                product: req.product.clone(),
                quantity: req.quantity,
                price: req.price,
            })
            .await?;

        info!(order_id = order.id, user_id, "Order created: product={}", order.product);
        Ok(order)
    }

    pub async fn list_orders(&self, user_id: i64) -> Result<Vec<Order>, ServiceError> {
        self.ensure_user_exists(user_id).await?;
        Ok(self.orders.list_by_user(user_id).await?)
    }
}
