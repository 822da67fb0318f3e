//! Checkout routes.
//!
//! The draft view hands the client everything the checkout form needs in
//! one response; placing the order validates server-side and returns 422
//! with the per-field error map when the address is bad. The confirmation
//! resource reads the persisted snapshot, so a reload after restart still
//! shows the placed order.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use skinaura_core::PaymentMethod;

use crate::error::{AppError, Result};
use crate::invoice::{self, InvoiceDocument};
use crate::models::{Order, SavedAddress, ShippingAddress};
use crate::services::checkout::OrderConfirmation;
use crate::state::AppState;

use super::cart::CartView;

/// Everything the checkout form needs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    /// Saved addresses, default first; the first one is the initial
    /// selection.
    pub saved_addresses: Vec<SavedAddress>,
    pub cart: CartView,
}

/// Place-order request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// GET /checkout
///
/// # Errors
///
/// Returns 401 when no session is active.
pub async fn draft(State(state): State<AppState>) -> Result<Json<CheckoutDraft>> {
    let user = super::require_user(&state)?;
    Ok(Json(CheckoutDraft {
        saved_addresses: state.addresses().list(&user.id),
        cart: CartView::current(&state),
    }))
}

/// POST /checkout
///
/// # Errors
///
/// Returns 401 without a session, 422 with the field-error map for an
/// invalid address, 400 for an empty cart.
pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let user = super::require_user(&state)?;
    let order = state
        .checkout()
        .place_order(&user.id, body.shipping_address, body.payment_method, body.notes)?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /checkout/confirmation
///
/// # Errors
///
/// Returns 401 without a session, 404 when no order was ever placed.
pub async fn confirmation(State(state): State<AppState>) -> Result<Json<OrderConfirmation>> {
    super::require_user(&state)?;
    let confirmation = state
        .checkout()
        .last_confirmation()
        .ok_or_else(|| AppError::NotFound("no order has been placed".to_owned()))?;
    Ok(Json(confirmation))
}

/// GET /checkout/confirmation/invoice
///
/// Serves the invoice for the last placed order as a PDF download.
///
/// # Errors
///
/// Returns 401 without a session, 404 when no order was ever placed, 500 if
/// rendering fails.
pub async fn invoice_pdf(State(state): State<AppState>) -> Result<Response> {
    super::require_user(&state)?;
    let confirmation = state
        .checkout()
        .last_confirmation()
        .ok_or_else(|| AppError::NotFound("no order has been placed".to_owned()))?;

    let document = InvoiceDocument::from_confirmation(&confirmation);
    let bytes = invoice::render(&document)
        .map_err(|e| AppError::Internal(format!("invoice rendering failed: {e}")))?;

    let disposition = format!("attachment; filename=\"{}\"", document.filename());
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
