#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

use user_order_api::auth::{Claims, TokenService};
use user_order_api::config::AppConfig;
use user_order_api::testing::MemoryStore;
use user_order_api::{app, AppState};

pub struct TestServer {
    pub base_url: String,
    pub store: MemoryStore,
    pub tokens: Arc<TokenService>,
    pub client: Client,
}

impl TestServer {
    /// Serve the full app over the in-memory store on a free local port.
    ///
    /// Each `#[tokio::test]` owns its runtime, so every test spawns its own server.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = AppConfig::development();
        let store = MemoryStore::new();
        let state = AppState::new(config, store.user_repository(), store.order_repository());
        let tokens = state.tokens.clone();

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            base_url,
            store,
            tokens,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /users and return the created user's id
    pub async fn register(&self, name: &str, email: &str, age: i32) -> Result<i64> {
        let res = self
            .client
            .post(self.url("/users"))
            .json(&json!({ "name": name, "email": email, "age": age, "password": "password123" }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());
        let body: Value = res.json().await?;
        body["id"].as_i64().context("created user has no id")
    }

    pub async fn login(&self, email: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": "password123" }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        let body: Value = res.json().await?;
        body["token"].as_str().map(String::from).context("login response has no token")
    }

    /// Register then log in; returns (user id, bearer token)
    pub async fn register_and_login(&self, name: &str, email: &str, age: i32) -> Result<(i64, String)> {
        let id = self.register(name, email, age).await?;
        let token = self.login(email).await?;
        Ok((id, token))
    }

    /// Token for `user_id` that expired a minute ago, signed with the server's key
    pub fn expired_token(&self, user_id: i64) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            user_id,
            exp: now - 60,
            iat: now - 120,
        };
        Ok(self.tokens.sign(&claims)?)
    }
}

/// Status plus decoded JSON body (Null for empty bodies)
pub async fn read(res: Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let text = res.text().await?;
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).with_context(|| format!("non-JSON body: {}", text))?
    };
    Ok((status, body))
}
