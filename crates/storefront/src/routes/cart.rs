//! Cart routes.
//!
//! Every response carries the full cart view with derived totals and the
//! shipping preview, so the client never computes money on its own. The
//! preview uses the same `shipping_cost` function checkout applies at order
//! time.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use skinaura_core::{Price, ProductId};

use crate::error::Result;
use crate::models::CartLine;
use crate::services::Notice;
use crate::services::checkout::shipping_cost;
use crate::state::AppState;

/// The cart as the client renders it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total_items: u32,
    pub subtotal: Price,
    pub shipping_cost: Price,
    pub estimated_total: Price,
}

impl CartView {
    pub(crate) fn current(state: &AppState) -> Self {
        let subtotal = state.cart().total_price();
        let shipping = shipping_cost(subtotal);
        Self {
            lines: state.cart().lines(),
            total_items: state.cart().total_items(),
            subtotal,
            shipping_cost: shipping,
            estimated_total: subtotal + shipping,
        }
    }
}

/// A mutation response: the notice plus the updated cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutation {
    pub notice: Notice,
    pub cart: CartView,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// GET /cart
///
/// # Errors
///
/// Returns 401 when no session is active.
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    super::require_user(&state)?;
    Ok(Json(CartView::current(&state)))
}

/// POST /cart/items
///
/// Adds the product, merging into an existing line if present.
///
/// # Errors
///
/// Returns 401 without a session, 404 for an unknown product id.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartMutation>> {
    super::require_user(&state)?;
    let cancel = CancellationToken::new();
    let product = state.catalog().by_id(&body.product_id, &cancel).await?;
    let notice = state.cart().add_item(&product, body.quantity)?;
    Ok(Json(CartMutation {
        notice,
        cart: CartView::current(&state),
    }))
}

/// PUT /cart/items/{id}
///
/// Replaces the line's quantity; zero removes the line. An id with no line
/// is a silent no-op, matching the store.
///
/// # Errors
///
/// Returns 401 without a session.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    super::require_user(&state)?;
    state.cart().update_quantity(&id, body.quantity)?;
    Ok(Json(CartView::current(&state)))
}

/// DELETE /cart/items/{id}
///
/// # Errors
///
/// Returns 401 without a session.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CartMutation>> {
    super::require_user(&state)?;
    let notice = state.cart().remove_item(&id)?;
    Ok(Json(CartMutation {
        notice,
        cart: CartView::current(&state),
    }))
}

/// DELETE /cart
///
/// # Errors
///
/// Returns 401 without a session.
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    super::require_user(&state)?;
    state.cart().clear()?;
    Ok(Json(CartView::current(&state)))
}
