use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::auth::{generate_jwt, Claims};
use crate::config::AppConfig;
use crate::database::models::User;
use crate::database::MemoryStore;
use crate::router;
use crate::state::AppState;

/// In-process application with two seeded accounts, driven through `oneshot`.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
    pub user: User,
    pub other: User,
}

impl TestContext {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let user = store.insert_user(User::new("user@example.com", "Test User")).await;
        let other = store.insert_user(User::new("other@example.com", "Other User")).await;
        let state = AppState::new(AppConfig::development(), store.clone());

        Self {
            store,
            state,
            user,
            other,
        }
    }

    /// Rebuild the state with an adjusted configuration, keeping the store.
    pub fn configure(&mut self, adjust: impl FnOnce(&mut AppConfig)) {
        let mut config = (*self.state.config).clone();
        adjust(&mut config);
        self.state = AppState::new(config, self.store.clone());
    }

    pub fn token_for(&self, user: &User) -> String {
        let security = &self.state.config.security;
        let claims = Claims::new(user.id, &user.email, security.jwt_expiry_hours);
        generate_jwt(&claims, &security.jwt_secret).expect("token generation")
    }

    pub fn app(&self) -> Router {
        router::app(self.state.clone())
    }

    /// Send a JSON request, authenticated as `user` when given.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<&User>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = user.map(|u| self.token_for(u));
        let body = body.map(|b| b.to_string());
        self.send(method, uri, token.as_deref(), body).await
    }

    pub async fn request_with_token(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send(method, uri, Some(token), body.map(|b| b.to_string())).await
    }

    /// Send a raw body, for payloads that are not valid JSON.
    pub async fn raw_request(
        &self,
        method: Method,
        uri: &str,
        user: Option<&User>,
        body: &str,
    ) -> (StatusCode, Value) {
        let token = user.map(|u| self.token_for(u));
        self.send(method, uri, token.as_deref(), Some(body.to_string())).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.app().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };

        (status, json)
    }
}
