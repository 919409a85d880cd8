//! In-memory implementations of the repository traits.
//!
//! Used by unit and integration tests to run the full handler → service →
//! repository stack without PostgreSQL. The store mimics the database
//! behaviour the services rely on: monotonic ids, a unique email index and
//! newest-first order listing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::{
    DatabaseError, NewOrder, NewUser, Order, OrderRepository, User, UserFilter, UserRepository,
    UserUpdate,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    orders: Vec<Order>,
    next_user_id: i64,
    next_order_id: i64,
}

/// Shared in-memory tables. Cloning yields another handle to the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    user_inserts: Arc<AtomicUsize>,
    order_inserts: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful user inserts so far
    pub fn user_inserts(&self) -> usize {
        self.user_inserts.load(Ordering::SeqCst)
    }

    /// Number of successful order inserts so far
    pub fn order_inserts(&self) -> usize {
        self.order_inserts.load(Ordering::SeqCst)
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.clone())
    }

    pub fn order_repository(&self) -> Arc<dyn OrderRepository> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: tables.next_user_id,
            name: user.name,
            email: user.email,
            age: user.age,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(created.id, created.clone());
        self.user_inserts.fetch_add(1, Ordering::SeqCst);

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self, filter: UserFilter) -> Result<(Vec<User>, i64), DatabaseError> {
        let tables = self.tables.read().await;
        let matching: Vec<&User> = tables.users.values().filter(|u| filter.matches(u)).collect();
        let total = matching.len() as i64;

        let offset = usize::try_from(filter.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit).unwrap_or(0);
        let page = matching.into_iter().skip(offset).take(limit).cloned().collect();

        Ok((page, total))
    }

    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.id != id && u.email == update.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        Ok(tables.users.get_mut(&id).map(|user| {
            user.name = update.name;
            user.email = update.email;
            user.age = update.age;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: NewOrder) -> Result<Order, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_order_id += 1;

        let created = Order {
            id: tables.next_order_id,
            user_id: order.user_id,
            product: order.product,
            quantity: order.quantity,
            price: order.price,
            created_at: Utc::now(),
        };
        tables.orders.push(created.clone());
        self.order_inserts.fetch_add(1, Ordering::SeqCst);

        Ok(created)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Order>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(orders)
    }
}
