//! Admin routes.
//!
//! The only admin surface: post-creation order status management. Items,
//! address, and totals are immutable once an order exists.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use skinaura_core::{OrderId, OrderStatus, PaymentStatus};

use crate::error::Result;
use crate::models::Order;
use crate::services::orders::StatusUpdate;
use crate::state::AppState;

/// Status update request body. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub tracking_number: Option<String>,
}

/// PUT /admin/orders/{id}/status
///
/// # Errors
///
/// Returns 401 without a session, 403 for a non-admin, 404 for an unknown
/// order id.
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    super::require_admin(&state)?;
    let order = state.orders().update_status(
        &id,
        StatusUpdate {
            status: body.status,
            payment_status: body.payment_status,
            tracking_number: body.tracking_number,
        },
    )?;
    Ok(Json(order))
}
