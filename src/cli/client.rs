use anyhow::{anyhow, Context};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Thin reqwest wrapper for the recipe API: bearer auth and envelope unwrapping.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health. Needs no token; reports whether the server answered 2xx.
    pub async fn health(&self) -> anyhow::Result<(bool, Value)> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .with_context(|| format!("failed to reach {}", url))?;

        let healthy = response.status().is_success();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Ok((healthy, body))
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> anyhow::Result<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> anyhow::Result<Value> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> anyhow::Result<Value> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<()> {
        self.send(Method::DELETE, path, None).await.map(|_| ())
    }

    /// Send a request and return the envelope's `data`, or `Null` for 204.
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> anyhow::Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, url))?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let payload: Value = response
            .json()
            .await
            .with_context(|| format!("{} {} returned a non-JSON body", method, url))?;

        if !status.is_success() {
            return Err(anyhow!(describe_failure(status, &payload)));
        }
        Ok(payload.get("data").cloned().unwrap_or(Value::Null))
    }
}

/// Render an error body as one line, field errors included.
fn describe_failure(status: StatusCode, payload: &Value) -> String {
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed");
    let mut line = format!("{} ({})", message, status.as_u16());

    if let Some(fields) = payload.get("field_errors").and_then(Value::as_object) {
        let details: Vec<String> = fields
            .iter()
            .map(|(field, reason)| format!("{}: {}", field, reason.as_str().unwrap_or_default()))
            .collect();
        if !details.is_empty() {
            line.push_str(&format!(" - {}", details.join("; ")));
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn failure_includes_field_errors() {
        let payload = json!({
            "error": true,
            "message": "Invalid input.",
            "code": "VALIDATION_ERROR",
            "field_errors": {"price": "A valid number is required."}
        });
        assert_eq!(
            describe_failure(StatusCode::BAD_REQUEST, &payload),
            "Invalid input. (400) - price: A valid number is required."
        );
    }

    #[test]
    fn failure_without_body_message() {
        assert_eq!(
            describe_failure(StatusCode::NOT_FOUND, &Value::Null),
            "request failed (404)"
        );
    }
}
