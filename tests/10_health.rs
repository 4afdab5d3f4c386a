mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.anonymous(Method::GET, "/health").send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::TestServer::start().await?;

    let body = server
        .anonymous(Method::GET, "/")
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(body["data"]["endpoints"]["tags"].is_string());
    Ok(())
}
