//! Account routes: saved addresses and order history.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use skinaura_core::{AddressId, OrderId};

use crate::error::{AppError, Result};
use crate::models::{Order, SavedAddress, ShippingAddress};
use crate::state::AppState;

/// GET /account/addresses
///
/// Saved addresses with the default first.
///
/// # Errors
///
/// Returns 401 when no session is active.
pub async fn addresses(State(state): State<AppState>) -> Result<Json<Vec<SavedAddress>>> {
    let user = super::require_user(&state)?;
    Ok(Json(state.addresses().list(&user.id)))
}

/// POST /account/addresses
///
/// # Errors
///
/// Returns 401 without a session, 422 with the field-error map on
/// validation failure.
pub async fn create_address(
    State(state): State<AppState>,
    Json(address): Json<ShippingAddress>,
) -> Result<(StatusCode, Json<SavedAddress>)> {
    let user = super::require_user(&state)?;
    let saved = state.addresses().add(&user.id, address)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /account/addresses/{id}
///
/// # Errors
///
/// Returns 401 without a session, 404 for an unknown address id.
pub async fn delete_address(
    State(state): State<AppState>,
    Path(id): Path<AddressId>,
) -> Result<StatusCode> {
    let user = super::require_user(&state)?;
    state.addresses().remove(&user.id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /account/addresses/{id}/default
///
/// # Errors
///
/// Returns 401 without a session, 404 for an unknown address id.
pub async fn set_default_address(
    State(state): State<AppState>,
    Path(id): Path<AddressId>,
) -> Result<Json<Vec<SavedAddress>>> {
    let user = super::require_user(&state)?;
    state.addresses().set_default(&user.id, &id)?;
    Ok(Json(state.addresses().list(&user.id)))
}

/// GET /account/orders
///
/// The user's order history, newest first.
///
/// # Errors
///
/// Returns 401 when no session is active.
pub async fn orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let user = super::require_user(&state)?;
    Ok(Json(state.orders().for_user(&user.id)))
}

/// GET /account/orders/{id}
///
/// # Errors
///
/// Returns 401 without a session, 404 if the order does not exist or
/// belongs to someone else.
pub async fn order(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Order>> {
    let user = super::require_user(&state)?;
    let order = state
        .orders()
        .get(&id)
        .filter(|o| o.user_id == user.id)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}
