mod common;

use anyhow::Result;
use reqwest::{header, Method, StatusCode};
use serde_json::{json, Value};

fn sample() -> Value {
    json!({
        "title": "Sample recipe title",
        "time_minutes": 22,
        "price": "5.25",
        "link": "http://example.com/recipe.pdf"
    })
}

async fn create(server: &common::TestServer, user: &recipe_api::database::models::User, body: Value) -> Result<Value> {
    let res = server.as_user(user, Method::POST, "/recipes").json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(res.json::<Value>().await?["data"].clone())
}

#[tokio::test]
async fn requires_authentication() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.anonymous(Method::GET, "/recipes").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
    Ok(())
}

#[tokio::test]
async fn create_defaults_description_to_empty() -> Result<()> {
    let server = common::TestServer::start().await?;
    let created = create(&server, &server.user, sample()).await?;

    assert_eq!(created["description"], "");
    assert_eq!(created["price"], "5.25");

    let stored = server.store.recipe_by_id(created["id"].as_i64().unwrap()).await.unwrap();
    assert_eq!(stored.user_id, server.user.id);
    Ok(())
}

#[tokio::test]
async fn other_users_recipe_is_not_found() -> Result<()> {
    let server = common::TestServer::start().await?;
    let theirs = create(&server, &server.other, sample()).await?;
    let path = format!("/recipes/{}", theirs["id"]);

    let res = server.as_user(&server.user, Method::GET, &path).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .as_user(&server.user, Method::PATCH, &path)
        .json(&json!({"title": "Mine now"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let list = server
        .as_user(&server.user, Method::GET, "/recipes")
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(list["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn patch_changes_only_given_fields() -> Result<()> {
    let server = common::TestServer::start().await?;
    let created = create(&server, &server.user, sample()).await?;
    let path = format!("/recipes/{}", created["id"]);

    let updated = server
        .as_user(&server.user, Method::PATCH, &path)
        .json(&json!({"title": "New recipe title"}))
        .send()
        .await?
        .json::<Value>()
        .await?;

    assert_eq!(updated["data"]["title"], "New recipe title");
    assert_eq!(updated["data"]["link"], created["link"]);
    assert_eq!(updated["data"]["price"], created["price"]);
    Ok(())
}

#[tokio::test]
async fn put_missing_required_field_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;
    let created = create(&server, &server.user, sample()).await?;

    let res = server
        .as_user(&server.user, Method::PUT, &format!("/recipes/{}", created["id"]))
        .json(&json!({"title": "Only a title"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["field_errors"]["time_minutes"], "This field is required.");
    assert_eq!(body["field_errors"]["price"], "This field is required.");
    Ok(())
}

#[tokio::test]
async fn delete_twice_returns_not_found() -> Result<()> {
    let server = common::TestServer::start().await?;
    let created = create(&server, &server.user, sample()).await?;
    let path = format!("/recipes/{}", created["id"]);

    let res = server.as_user(&server.user, Method::DELETE, &path).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = server.as_user(&server.user, Method::DELETE, &path).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
