//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Products
//! GET  /products                    - Filtered, sorted listing
//! GET  /products/featured           - Featured products
//! GET  /products/best-sellers       - Best sellers
//! GET  /products/new                - New arrivals
//! GET  /products/{id}               - Product detail (404 on unknown id)
//! GET  /search?q=                   - Case-insensitive search
//!
//! # Auth
//! POST /auth/login                  - Login action
//! POST /auth/signup                 - Create account and log in
//! POST /auth/logout                 - Logout action
//! GET  /auth/me                     - Current session user
//!
//! # Cart (requires auth)
//! GET    /cart                      - Cart view with derived totals
//! POST   /cart/items                - Add item (merges duplicates)
//! PUT    /cart/items/{id}           - Replace quantity (0 removes)
//! DELETE /cart/items/{id}           - Remove item
//! DELETE /cart                      - Empty the cart
//!
//! # Wishlist (requires auth)
//! GET    /wishlist                  - Saved products
//! POST   /wishlist/items            - Save a product (idempotent)
//! DELETE /wishlist/items/{id}       - Remove a product
//! DELETE /wishlist                  - Empty the wishlist
//!
//! # Account (requires auth)
//! GET    /account/addresses         - Saved addresses, default first
//! POST   /account/addresses         - Save a new address
//! DELETE /account/addresses/{id}    - Remove an address
//! PUT    /account/addresses/{id}/default - Mark as default
//! GET    /account/orders            - Order history, newest first
//! GET    /account/orders/{id}       - Single order
//!
//! # Checkout (requires auth)
//! GET  /checkout                    - Draft view: saved addresses, summary
//! POST /checkout                    - Place order (422 on invalid address)
//! GET  /checkout/confirmation       - Last confirmation snapshot
//! GET  /checkout/confirmation/invoice - Invoice PDF download
//!
//! # Admin (requires admin role)
//! PUT  /admin/orders/{id}/status    - Update order status fields
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/best-sellers", get(products::best_sellers))
        .route("/new", get(products::new_arrivals))
        .route("/{id}", get(products::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add))
        .route("/items/{id}", put(cart::update).delete(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show).delete(wishlist::clear))
        .route("/items", post(wishlist::add))
        .route("/items/{id}", delete(wishlist::remove))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/addresses",
            get(account::addresses).post(account::create_address),
        )
        .route("/addresses/{id}", delete(account::delete_address))
        .route("/addresses/{id}/default", put(account::set_default_address))
        .route("/orders", get(account::orders))
        .route("/orders/{id}", get(account::order))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::draft).post(checkout::place_order))
        .route("/confirmation", get(checkout::confirmation))
        .route("/confirmation/invoice", get(checkout::invoice_pdf))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/orders/{id}/status", put(admin::update_order_status))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(products::search))
        .nest("/products", product_routes())
        .nest("/auth", auth_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/account", account_routes())
        .nest("/checkout", checkout_routes())
        .nest("/admin", admin_routes())
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The logged-in user, or 401.
pub(crate) fn require_user(state: &AppState) -> Result<User, AppError> {
    state
        .sessions()
        .current()
        .ok_or_else(|| AppError::Unauthorized("login required".to_owned()))
}

/// The logged-in admin, or 401/403.
pub(crate) fn require_admin(state: &AppState) -> Result<User, AppError> {
    let user = require_user(state)?;
    if !user.is_admin() {
        return Err(AppError::Forbidden("admin role required".to_owned()));
    }
    Ok(user)
}
