//! Order model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skinaura_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price, UserId};

use super::ShippingAddress;
use super::product::Product;

/// A line item snapshotted into an order at purchase time.
///
/// `price` is captured, not re-derived: later catalog price changes never
/// retroactively affect a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u32,
    pub price: Price,
}

impl OrderItem {
    /// Price of this line at the captured unit price.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// A placed order.
///
/// Created once at checkout submission. Line items, address, and totals are
/// immutable thereafter; the status fields (and tracking number) are the
/// only parts the admin collaborator mutates post-creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub subtotal: Price,
    pub shipping_cost: Price,
    pub tax: Price,
    pub total: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
