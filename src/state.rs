use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{OrderRepository, PgOrderRepository, PgUserRepository, UserRepository};
use crate::services::{AuthService, OrderService, UserService};

/// Everything a handler can reach. Cloned per request, so every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<UserService>,
    pub orders: Arc<OrderService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        let tokens = Arc::new(TokenService::from_config(&config.security));

        Self {
            users: Arc::new(UserService::new(users.clone())),
            orders: Arc::new(OrderService::new(orders, users.clone())),
            auth: Arc::new(AuthService::new(users, tokens.clone())),
            tokens,
            config: Arc::new(config),
        }
    }

    /// Postgres-backed state for the running server
    pub fn with_pool(config: AppConfig, pool: PgPool) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
        let orders: Arc<dyn OrderRepository> = Arc::new(PgOrderRepository::new(pool));
        Self::new(config, users, orders)
    }
}
