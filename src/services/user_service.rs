use std::sync::Arc;

use tracing::{info, warn};

use super::ServiceError;
use crate::api::{CreateUserRequest, UpdateUserRequest};
use crate::auth::password::hash_password;
use crate::database::{DatabaseError, NewUser, User, UserFilter, UserRepository, UserUpdate};

/// Validated paging and age-range parameters for listing users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListUsersParams {
    pub page: u32,
    pub limit: u32,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl ListUsersParams {
    fn to_filter(self) -> UserFilter {
        let page = i64::from(self.page.max(1));
        let limit = i64::from(self.limit);
        UserFilter {
            min_age: self.min_age,
            max_age: self.max_age,
            offset: (page - 1) * limit,
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserPage {
    pub users: Vec<User>,
    /// Count of all matching users, independent of the page window
    pub total: i64,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a user: unique email, hashed password, then insert
    pub async fn create_user(&self, req: &CreateUserRequest) -> Result<User, ServiceError> {
        if self.users.find_by_email(&req.email).await?.is_some() {
            warn!("Attempt to create user with existing email: {}", req.email);
            return Err(ServiceError::EmailExists);
        }

        let password_hash = hash_password(&req.password)?;
        let user = self
            .users
            .create(NewUser {
                name: req.name.clone(),
                email: req.email.clone(),
                age: req.age,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User created: email={}", user.email);
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    pub async fn update_user(&self, id: i64, req: &UpdateUserRequest) -> Result<User, ServiceError> {
        let existing = self.get_user(id).await?;

        if existing.email != req.email {
            if let Some(other) = self.users.find_by_email(&req.email).await? {
                if other.id != id {
                    warn!(user_id = id, "Email {} already taken by user {}", req.email, other.id);
                    return Err(ServiceError::EmailExists);
                }
            }
        }

        let update = UserUpdate {
            name: req.name.clone(),
            email: req.email.clone(),
            age: req.age,
        };
        let user = self
            .users
            .update(id, update)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        info!(user_id = id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ServiceError> {
        self.get_user(id).await?;

        if !self.users.delete(id).await? {
            return Err(ServiceError::UserNotFound);
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }

    pub async fn list_users(&self, params: ListUsersParams) -> Result<UserPage, ServiceError> {
        let (users, total) = self.users.list(params.to_filter()).await?;
        Ok(UserPage { users, total })
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.users.ping().await
    }
}
