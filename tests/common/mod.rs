#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use recipe_api::auth::{generate_jwt, Claims};
use recipe_api::config::AppConfig;
use recipe_api::database::models::User;
use recipe_api::database::MemoryStore;
use recipe_api::router;
use recipe_api::state::AppState;

/// Server bound to a free local port, backed by an in-memory store with two accounts.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub user: User,
    pub other: User,
    config: AppConfig,
    client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryStore::new());
        let user = store.insert_user(User::new("user@example.com", "Test User")).await;
        let other = store.insert_user(User::new("other@example.com", "Other User")).await;

        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;

        let app = router::app(AppState::new(config.clone(), store.clone()));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            user,
            other,
            config,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let url = self.url("/health");
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(&url).send().await {
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

    pub fn token_for(&self, user: &User) -> String {
        let security = &self.config.security;
        let claims = Claims::new(user.id, &user.email, security.jwt_expiry_hours);
        generate_jwt(&claims, &security.jwt_secret).expect("token generation")
    }

    /// Request builder carrying `user`'s bearer token.
    pub fn as_user(&self, user: &User, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(self.token_for(user))
    }

    pub fn anonymous(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(path))
    }
}
