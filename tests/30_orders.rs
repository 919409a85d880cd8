mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{read, TestServer};

#[tokio::test]
async fn create_and_list_own_orders() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (id, token) = server.register_and_login("Ann", "ann@example.com", 30).await?;

    let res = server
        .client
        .post(server.url(&format!("/users/{}/orders", id)))
        .bearer_auth(&token)
        .json(&json!({ "product": "Book", "quantity": 2, "price": 10.5 }))
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user_id"], id);
    assert_eq!(body["product"], "Book");
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["price"], 10.5);
    assert!(body["id"].as_i64().is_some());
    assert!(body["created_at"].as_str().is_some());

    server
        .client
        .post(server.url(&format!("/users/{}/orders", id)))
        .bearer_auth(&token)
        .json(&json!({ "product": "Pen", "quantity": 1, "price": 1.25 }))
        .send()
        .await?;

    let res = server
        .client
        .get(server.url(&format!("/users/{}/orders", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::OK);
    let products: Vec<_> = body
        .as_array()
        .map(|orders| orders.iter().filter_map(|o| o["product"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(products, vec!["Pen", "Book"]);

    Ok(())
}

#[tokio::test]
async fn other_users_orders_are_forbidden() -> Result<()> {
    let server = TestServer::spawn().await?;
    let victim = server.register("Victim", "victim@example.com", 30).await?;
    let (_, token) = server.register_and_login("Ann", "ann@example.com", 30).await?;

    let res = server
        .client
        .get(server.url(&format!("/users/{}/orders", victim)))
        .bearer_auth(&token)
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied: you can only operate with your own orders");

    // Rejected before the body is looked at, even a broken one
    let res = server
        .client
        .post(server.url(&format!("/users/{}/orders", victim)))
        .bearer_auth(&token)
        .header("content-type", "application/json")
        .body("{broken")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(server.store.order_inserts(), 0);

    Ok(())
}

#[tokio::test]
async fn bad_path_id_is_rejected_before_ownership() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.register_and_login("Ann", "ann@example.com", 30).await?;

    for id in ["abc", "0", "-5"] {
        let res = server
            .client
            .get(server.url(&format!("/users/{}/orders", id)))
            .bearer_auth(&token)
            .send()
            .await?;
        let (status, body) = read(res).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid user ID in path");
    }

    Ok(())
}

#[tokio::test]
async fn order_validation_and_decode_failures() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (id, token) = server.register_and_login("Ann", "ann@example.com", 30).await?;
    let url = server.url(&format!("/users/{}/orders", id));

    let res = server
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "product": "", "quantity": 0, "price": -1 }))
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<_> = body["details"]
        .as_array()
        .map(|d| d.iter().filter_map(|e| e["field"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(fields.len(), 3, "details: {}", body);
    assert!(fields.contains(&"price"));

    let res = server
        .client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "product": "Book", "quantity": "two", "price": 1.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(server.store.order_inserts(), 0);

    Ok(())
}

#[tokio::test]
async fn price_outside_column_range_is_unprocessable() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (id, token) = server.register_and_login("Ann", "ann@example.com", 30).await?;
    let url = server.url(&format!("/users/{}/orders", id));

    for price in [json!(0.001), json!(1000000000), json!(12.345)] {
        let res = server
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "product": "Book", "quantity": 1, "price": price }))
            .send()
            .await?;
        let (status, body) = read(res).await?;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "price {}", price);
        assert_eq!(body["details"][0]["field"], "price");
    }
    assert_eq!(server.store.order_inserts(), 0);

    Ok(())
}

#[tokio::test]
async fn deleted_owner_gets_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (id, token) = server.register_and_login("Ann", "ann@example.com", 30).await?;

    let res = server.client.delete(server.url(&format!("/users/{}", id))).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Token still verifies; the owner no longer exists
    let res = server
        .client
        .post(server.url(&format!("/users/{}/orders", id)))
        .bearer_auth(&token)
        .json(&json!({ "product": "Book", "quantity": 1, "price": 5 }))
        .send()
        .await?;
    let (status, body) = read(res).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
    assert_eq!(server.store.order_inserts(), 0);

    Ok(())
}
