//! Invoice generation.
//!
//! An [`InvoiceDocument`] is a pure snapshot of everything the invoice
//! prints; building one never touches storage. The PDF renderer in
//! [`pdf`] turns it into bytes for download.

pub mod pdf;

pub use pdf::render;

use skinaura_core::{PaymentMethod, Price};

use crate::models::{CartLine, Order, OrderItem, ShippingAddress};
use crate::services::checkout::{OrderConfirmation, format_order_date};

/// One printed invoice row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

impl From<&CartLine> for InvoiceLine {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            line_total: line.line_price(),
        }
    }
}

impl From<&OrderItem> for InvoiceLine {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.price,
            line_total: item.line_total(),
        }
    }
}

/// Everything the invoice prints, in print order.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    /// Printed as `INV-{order_id}`.
    pub order_id: String,
    /// Human-readable order date, e.g. `August 23, 2026`.
    pub order_date: String,
    pub lines: Vec<InvoiceLine>,
    pub bill_to: ShippingAddress,
    pub subtotal: Price,
    pub shipping_cost: Price,
    pub total: Price,
    pub payment_method: PaymentMethod,
}

impl InvoiceDocument {
    /// Build from a stored order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id.as_str().to_owned(),
            order_date: format_order_date(&order.created_at),
            lines: order.items.iter().map(InvoiceLine::from).collect(),
            bill_to: order.shipping_address.clone(),
            subtotal: order.subtotal,
            shipping_cost: order.shipping_cost,
            total: order.total,
            payment_method: order.payment_method,
        }
    }

    /// Build from a re-hydrated confirmation snapshot.
    #[must_use]
    pub fn from_confirmation(confirmation: &OrderConfirmation) -> Self {
        Self {
            order_id: confirmation.order_id.as_str().to_owned(),
            order_date: confirmation.order_date.clone(),
            lines: confirmation.items.iter().map(InvoiceLine::from).collect(),
            bill_to: confirmation.shipping_address.clone(),
            subtotal: confirmation.subtotal,
            shipping_cost: confirmation.shipping_cost,
            total: confirmation.total,
            payment_method: confirmation.payment_method,
        }
    }

    /// Suggested download filename, e.g. `invoice-ORD-0042137.pdf`.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("invoice-{}.pdf", self.order_id)
    }
}

/// Assemble an invoice from its parts.
///
/// Lines may come from live cart lines or snapshotted order items; both
/// normalize through [`InvoiceLine`]. No storage or network side effects.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn generate_invoice(
    order_id: impl Into<String>,
    order_date: impl Into<String>,
    lines: Vec<InvoiceLine>,
    bill_to: ShippingAddress,
    subtotal: Price,
    shipping_cost: Price,
    total: Price,
    payment_method: PaymentMethod,
) -> InvoiceDocument {
    InvoiceDocument {
        order_id: order_id.into(),
        order_date: order_date.into(),
        lines,
        bill_to,
        subtotal,
        shipping_cost,
        total,
        payment_method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::address::fixtures::valid_address;
    use crate::models::product::fixtures::sample_product;
    use chrono::{TimeZone, Utc};
    use skinaura_core::{OrderId, OrderStatus, PaymentStatus, UserId};

    fn order() -> Order {
        let product = sample_product("1", 1299);
        let item = OrderItem {
            quantity: 2,
            price: product.price,
            product,
        };
        let subtotal = item.line_total();
        Order {
            id: OrderId::new("ORD-0042137"),
            user_id: UserId::new("u1"),
            items: vec![item],
            shipping_address: valid_address(),
            payment_method: PaymentMethod::GPay,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            subtotal,
            shipping_cost: Price::ZERO,
            tax: Price::ZERO,
            total: subtotal,
            created_at: Utc.with_ymd_and_hms(2026, 8, 23, 10, 0, 0).single().expect("date"),
            updated_at: Utc.with_ymd_and_hms(2026, 8, 23, 10, 0, 0).single().expect("date"),
            tracking_number: None,
            notes: None,
        }
    }

    #[test]
    fn test_document_from_order() {
        let doc = InvoiceDocument::from_order(&order());
        assert_eq!(doc.order_id, "ORD-0042137");
        assert_eq!(doc.order_date, "August 23, 2026");
        assert_eq!(doc.lines.len(), 1);
        let line = doc.lines.first().expect("line");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total, Price::from_rupees(2598));
        assert_eq!(doc.filename(), "invoice-ORD-0042137.pdf");
    }

    #[test]
    fn test_cart_lines_and_order_items_normalize_identically() {
        let product = sample_product("1", 1299);
        let cart_line = CartLine {
            product: product.clone(),
            quantity: 2,
        };
        let order_item = OrderItem {
            quantity: 2,
            price: product.price,
            product,
        };
        assert_eq!(InvoiceLine::from(&cart_line), InvoiceLine::from(&order_item));
    }

    #[test]
    fn test_line_from_cart_uses_current_price() {
        let line = CartLine {
            product: sample_product("3", 899),
            quantity: 3,
        };
        let invoice_line = InvoiceLine::from(&line);
        assert_eq!(invoice_line.unit_price, Price::from_rupees(899));
        assert_eq!(invoice_line.line_total, Price::from_rupees(2697));
    }
}
