//! API integration tests against a running server
//!
//! Requires a server on localhost:8080 backed by a database holding the shop
//! given in `SHOPSLOT_TEST_SHOP` (owned by `SHOPSLOT_TEST_OWNER`), and the
//! server's `JWT_SECRET`.

use reqwest::Client;
use serde_json::{json, Value};

use shopslot_server::models::user::{Role, UserClaims};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn shop_id() -> String {
    std::env::var("SHOPSLOT_TEST_SHOP").expect("SHOPSLOT_TEST_SHOP not set")
}

/// Helper to mint an owner token the server accepts
fn owner_token() -> String {
    let secret = env_or("JWT_SECRET", "change-this-secret-in-production");
    let owner = env_or("SHOPSLOT_TEST_OWNER", "owner@example.com");
    UserClaims::new("integration", owner, Role::Owner, 1)
        .create_token(&secret)
        .expect("Failed to sign token")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_availability_without_date() {
    let client = Client::new();

    let response = client
        .get(format!("{}/shops/{}/availability", BASE_URL, shop_id()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_hours_then_availability() {
    let client = Client::new();
    let token = owner_token();
    let shop = shop_id();

    let hours: Vec<Value> = (0..7)
        .map(|day| json!({"dayOfWeek": day, "openTime": "10:00", "closeTime": "20:00", "isClosed": false}))
        .collect();
    let response = client
        .put(format!("{}/schedule/hours", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"shopId": shop, "hours": hours}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/shops/{}/availability?date=2030-06-04", BASE_URL, shop))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    if body["available"] == true {
        let slots = body["slots"].as_array().expect("No slots");
        assert_eq!(slots.len(), 20);
        assert_eq!(slots[0]["time"], "10:00");
        assert_eq!(slots[19]["time"], "19:30");
    } else {
        // a holiday registered on that date takes precedence
        assert_eq!(body["reason"], "holiday");
    }
}

#[tokio::test]
#[ignore]
async fn test_block_and_unblock() {
    let client = Client::new();
    let token = owner_token();
    let shop = shop_id();

    for action in ["block", "block", "unblock", "unblock"] {
        let response = client
            .post(format!("{}/schedule/blocked-slots", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({"shopId": shop, "date": "2030-06-04", "time": "12:00", "action": action}))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["blocked"], action == "block");
    }
}
