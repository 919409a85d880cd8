use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::UserRepository;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewUser, User, UserFilter, UserUpdate};

const USER_COLUMNS: &str = "id, name, email, age, password_hash, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the age-range predicates shared by the count and page queries
fn push_age_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &UserFilter) {
    let mut separator = " WHERE ";
    if let Some(min_age) = filter.min_age {
        builder.push(separator).push("age >= ").push_bind(min_age);
        separator = " AND ";
    }
    if let Some(max_age) = filter.max_age {
        builder.push(separator).push("age <= ").push_bind(max_age);
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (name, email, age, password_hash) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );

        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.age)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create user in DB: {}", e);
                DatabaseError::from(e)
            })?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user by email: {}", e);
                DatabaseError::from(e)
            })?;

        Ok(user)
    }

    async fn list(&self, filter: UserFilter) -> Result<(Vec<User>, i64), DatabaseError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users");
        push_age_filter(&mut count, &filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count users: {}", e);
                DatabaseError::from(e)
            })?;

        let mut page = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM users", USER_COLUMNS));
        push_age_filter(&mut page, &filter);
        page.push(" ORDER BY id ASC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset);

        let users = page
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {}", e);
                DatabaseError::from(e)
            })?;

        Ok((users, total))
    }

    async fn update(&self, id: i64, update: UserUpdate) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "UPDATE users SET name = $1, email = $2, age = $3, updated_at = now() WHERE id = $4 RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&update.name)
            .bind(&update.email)
            .bind(update.age)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update user id={}: {}", id, e);
                DatabaseError::from(e)
            })?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete user id={}: {}", id, e);
                DatabaseError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
