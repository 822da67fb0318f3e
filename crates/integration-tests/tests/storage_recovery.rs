//! Restart re-hydration and corrupted-storage handling.

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use skinaura_integration_tests::TestHarness;

#[tokio::test]
async fn test_session_and_cart_survive_restart() {
    let mut harness = TestHarness::new();
    harness.login_demo_user().await;
    harness.add_to_cart("1", 3).await;

    harness.restart();

    // The persisted session re-hydrates and drives the cart store.
    let (status, me) = harness.request(Method::GET, "/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], json!("user@example.com"));

    let (_, cart) = harness.request(Method::GET, "/cart").await;
    assert_eq!(cart["totalItems"], json!(3));
}

#[tokio::test]
async fn test_corrupt_data_file_starts_empty() {
    let mut harness = TestHarness::new();
    harness.login_demo_user().await;
    harness.add_to_cart("1", 1).await;

    std::fs::write(harness.data_path(), b"{ not json").expect("write garbage");
    harness.restart();

    // The whole file is discarded; the store starts over.
    let (status, _) = harness.request(Method::GET, "/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, products) = harness.request(Method::GET, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products.as_array().map(Vec::len), Some(9));
}

#[tokio::test]
async fn test_corrupt_cart_value_recovers_empty() {
    let mut harness = TestHarness::new();
    harness.login_demo_user().await;
    harness.add_to_cart("1", 2).await;

    // Corrupt just the cart key; the rest of the file stays valid.
    let raw = std::fs::read_to_string(harness.data_path()).expect("read data file");
    let mut data: Value = serde_json::from_str(&raw).expect("parse data file");
    data["cart_1"] = json!("definitely not cart lines");
    std::fs::write(harness.data_path(), data.to_string()).expect("write data file");

    harness.restart();

    // Session survives; the malformed cart is discarded, not an error.
    let (status, me) = harness.request(Method::GET, "/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], json!("1"));

    let (status, cart) = harness.request(Method::GET, "/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["totalItems"], json!(0));

    // The cart is usable again immediately.
    harness.add_to_cart("2", 1).await;
    let (_, cart) = harness.request(Method::GET, "/cart").await;
    assert_eq!(cart["totalItems"], json!(1));
}

#[tokio::test]
async fn test_orders_survive_restart() {
    let mut harness = TestHarness::new();
    harness.login_demo_user().await;
    harness.add_to_cart("5", 1).await;
    let (_, order) = harness
        .request_json(
            Method::POST,
            "/checkout",
            &json!({ "shippingAddress": TestHarness::valid_address() }),
        )
        .await;

    harness.restart();

    let (status, orders) = harness.request(Method::GET, "/account/orders").await;
    assert_eq!(status, StatusCode::OK);
    let orders = orders.as_array().expect("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], order["id"]);
}
