//! Integration tests for SkinAura.
//!
//! Each test builds the full router over a fresh temp-file data store and
//! drives it through `tower::ServiceExt::oneshot`, so the whole stack runs
//! in-process with no listening socket.
//!
//! # Test Categories
//!
//! - `checkout_workflow` - Cart to confirmed order, invoice download
//! - `identity` - Login, signup, logout, per-user state isolation
//! - `storage_recovery` - Restart re-hydration and corruption handling

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use skinaura_storefront::config::StorefrontConfig;
use skinaura_storefront::routes;
use skinaura_storefront::state::AppState;

/// One storefront instance over a temp data file.
pub struct TestHarness {
    dir: tempfile::TempDir,
    state: AppState,
    router: Router,
}

impl TestHarness {
    /// Build a fresh storefront with an empty data store.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = Self::build_state(dir.path().join("data.json"));
        let router = routes::routes().with_state(state.clone());
        Self { dir, state, router }
    }

    /// Rebuild state and router over the same data file, as a process
    /// restart would.
    pub fn restart(&mut self) {
        self.state = Self::build_state(self.data_path());
        self.router = routes::routes().with_state(self.state.clone());
    }

    fn build_state(data_path: PathBuf) -> AppState {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("host"),
            port: 0,
            data_path,
            simulated_latency: false,
        };
        AppState::new(config).expect("state")
    }

    /// Path of the JSON data file backing this instance.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.dir.path().join("data.json")
    }

    /// Direct access to the application state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a request with no body.
    pub async fn request(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        (status, body_json(response).await)
    }

    /// Send a request with a JSON body.
    pub async fn request_json(
        &self,
        method: Method,
        uri: &str,
        body: &Value,
    ) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        (status, body_json(response).await)
    }

    /// Send a request and return the raw body bytes.
    pub async fn request_bytes(&self, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, bytes.to_vec())
    }

    /// Log in as the seeded demo user.
    pub async fn login_demo_user(&self) {
        let (status, _) = self
            .request_json(
                Method::POST,
                "/auth/login",
                &serde_json::json!({
                    "email": "user@example.com",
                    "password": "password123",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Log in as the seeded admin account.
    pub async fn login_admin(&self) {
        let (status, _) = self
            .request_json(
                Method::POST,
                "/auth/login",
                &serde_json::json!({
                    "email": "admin@example.com",
                    "password": "admin123",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Add `quantity` of the seed product `product_id` to the cart.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) {
        let (status, _) = self
            .request_json(
                Method::POST,
                "/cart/items",
                &serde_json::json!({ "productId": product_id, "quantity": quantity }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    /// A shipping address that passes validation.
    #[must_use]
    pub fn valid_address() -> Value {
        serde_json::json!({
            "fullName": "Priya Sharma",
            "addressLine1": "14 Marine Drive",
            "addressLine2": "",
            "city": "Mumbai",
            "state": "Maharashtra",
            "zipCode": "400012",
            "phoneNumber": "9876543210",
        })
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    }
}
