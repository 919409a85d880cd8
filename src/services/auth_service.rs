use std::sync::Arc;

use tracing::{info, warn};

use super::ServiceError;
use crate::auth::password::verify_password;
use crate::auth::TokenService;
use crate::database::UserRepository;

/// Exchanges email + password for a bearer token
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Unknown email and wrong password are indistinguishable to the caller
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ServiceError> {
        let user = self.users.find_by_email(email).await?;

        let user = match user {
            Some(user) if verify_password(password, &user.password_hash) => user,
            _ => {
                warn!("Invalid credentials for email: {}", email);
                return Err(ServiceError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(user.id)?;
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::database::NewUser;
    use crate::testing::MemoryStore;
    use std::time::Duration;

    async fn setup() -> (AuthService, Arc<TokenService>) {
        let store = MemoryStore::new();
        store
            .user_repository()
            .create(NewUser {
                name: "A".into(),
                email: "a@b.com".into(),
                age: 20,
                password_hash: hash_password("12345678").unwrap(),
            })
            .await
            .unwrap();
        let tokens = Arc::new(TokenService::new(b"secret", Duration::from_secs(60)));
        (AuthService::new(store.user_repository(), tokens.clone()), tokens)
    }

    #[tokio::test]
    async fn login_issues_token_for_user() {
        let (svc, tokens) = setup().await;
        let token = svc.login("a@b.com", "12345678").await.unwrap();
        assert_eq!(tokens.verify(&token).unwrap().user_id, 1);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (svc, _) = setup().await;
        let err = svc.login("a@b.com", "wrongpass").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let (svc, _) = setup().await;
        let err = svc.login("notfound@b.com", "12345678").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}
