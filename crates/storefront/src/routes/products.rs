//! Product catalog routes.
//!
//! Every handler passes the catalog a fresh [`CancellationToken`] scoped to
//! its request, so independent requests never cancel each other's fetches.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use skinaura_core::ProductId;

use crate::catalog::ProductFilter;
use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// GET /products
///
/// Filtered, sorted listing. All filter criteria are optional query
/// parameters; an empty query returns the catalog in popularity order.
///
/// # Errors
///
/// Returns an error if the catalog fetch is cancelled.
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>> {
    let cancel = request_token();
    let products = state.catalog().listing(&filter, &cancel).await?;
    Ok(Json(products))
}

/// GET /products/{id}
///
/// # Errors
///
/// Returns 404 for an unknown product id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let cancel = request_token();
    let product = state.catalog().by_id(&id, &cancel).await?;
    Ok(Json(product))
}

/// GET /products/featured
///
/// # Errors
///
/// Returns an error if the catalog fetch is cancelled.
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let cancel = request_token();
    Ok(Json(state.catalog().featured(&cancel).await?))
}

/// GET /products/best-sellers
///
/// # Errors
///
/// Returns an error if the catalog fetch is cancelled.
pub async fn best_sellers(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let cancel = request_token();
    Ok(Json(state.catalog().best_selling(&cancel).await?))
}

/// GET /products/new
///
/// # Errors
///
/// Returns an error if the catalog fetch is cancelled.
pub async fn new_arrivals(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let cancel = request_token();
    Ok(Json(state.catalog().new_arrivals(&cancel).await?))
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /search?q=
///
/// # Errors
///
/// Returns an error if the catalog fetch is cancelled.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    let cancel = request_token();
    Ok(Json(state.catalog().search(&query.q, &cancel).await?))
}

fn request_token() -> CancellationToken {
    CancellationToken::new()
}
