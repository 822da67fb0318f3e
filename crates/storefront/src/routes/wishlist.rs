//! Wishlist routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use skinaura_core::ProductId;

use crate::error::Result;
use crate::models::Product;
use crate::services::Notice;
use crate::services::wishlist::WishlistAdd;
use crate::state::AppState;

/// A mutation response: the notice plus the updated wishlist.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistMutation {
    pub notice: Notice,
    /// False when the product was already saved and nothing changed.
    pub added: bool,
    pub items: Vec<Product>,
}

/// Save-to-wishlist request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

/// GET /wishlist
///
/// # Errors
///
/// Returns 401 when no session is active.
pub async fn show(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    super::require_user(&state)?;
    Ok(Json(state.wishlist().items()))
}

/// POST /wishlist/items
///
/// Idempotent: saving an already-saved product changes nothing and reports
/// `added: false` with the distinct notice.
///
/// # Errors
///
/// Returns 401 without a session, 404 for an unknown product id.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<WishlistMutation>> {
    super::require_user(&state)?;
    let cancel = CancellationToken::new();
    let product = state.catalog().by_id(&body.product_id, &cancel).await?;
    let outcome = state.wishlist().add_item(&product)?;
    let added = matches!(outcome, WishlistAdd::Added(_));
    Ok(Json(WishlistMutation {
        notice: outcome.notice().clone(),
        added,
        items: state.wishlist().items(),
    }))
}

/// DELETE /wishlist/items/{id}
///
/// # Errors
///
/// Returns 401 without a session.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<WishlistMutation>> {
    super::require_user(&state)?;
    let notice = state.wishlist().remove_item(&id)?;
    Ok(Json(WishlistMutation {
        notice,
        added: false,
        items: state.wishlist().items(),
    }))
}

/// DELETE /wishlist
///
/// # Errors
///
/// Returns 401 without a session.
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    super::require_user(&state)?;
    state.wishlist().clear()?;
    Ok(StatusCode::NO_CONTENT)
}
