//! Checkout workflow.
//!
//! Turns the current cart plus a shipping address and payment method into a
//! placed order: validate the address, snapshot the cart lines at their
//! current prices, compute totals, persist the order and the confirmation
//! snapshot, then empty the cart. The confirmation snapshot survives under
//! shared keys so the confirmation view can re-hydrate after a restart even
//! when the in-memory order is gone.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::instrument;

use skinaura_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price, UserId};

use crate::models::{Order, OrderItem, ShippingAddress, ValidationErrors};
use crate::storage::{KvStore, StorageError, keys};

use super::cart::CartStore;
use super::orders::OrderService;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::from_rupees(999);

/// Flat fee applied below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Price = Price::from_rupees(99);

/// Shipping cost for a given subtotal.
#[must_use]
pub fn shipping_cost(subtotal: Price) -> Price {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Price::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// Human-readable order date, `August 3, 2026` style.
#[must_use]
pub(crate) fn format_order_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Errors from placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The shipping address failed form validation.
    #[error("shipping address failed validation")]
    Validation(ValidationErrors),

    /// Checkout with an empty cart.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Everything the confirmation view needs, re-hydrated from storage.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub order_date: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub subtotal: Price,
    pub shipping_cost: Price,
    pub total: Price,
}

/// The checkout service.
pub struct CheckoutService {
    storage: Arc<KvStore>,
    cart: Arc<CartStore>,
    orders: Arc<OrderService>,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(storage: Arc<KvStore>, cart: Arc<CartStore>, orders: Arc<OrderService>) -> Self {
        Self {
            storage,
            cart,
            orders,
        }
    }

    /// Place an order for the current cart.
    ///
    /// On success the cart is emptied and the confirmation snapshot is
    /// persisted; the returned order is already stored.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] with the field-error map if the
    /// address is invalid, [`CheckoutError::EmptyCart`] when there is nothing
    /// to order, or a storage error if persisting fails.
    #[instrument(skip(self, address), fields(user_id = %user_id))]
    pub fn place_order(
        &self,
        user_id: &UserId,
        address: ShippingAddress,
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> Result<Order, CheckoutError> {
        address.validate().map_err(CheckoutError::Validation)?;

        let lines = self.cart.lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let items: Vec<OrderItem> = lines
            .iter()
            .map(|line| OrderItem {
                price: line.product.price,
                product: line.product.clone(),
                quantity: line.quantity,
            })
            .collect();

        let subtotal: Price = items.iter().map(OrderItem::line_total).sum();
        let shipping = shipping_cost(subtotal);
        let tax = Price::ZERO;
        let total = subtotal + shipping + tax;

        let now = Utc::now();
        let order = Order {
            id: generate_order_id(),
            user_id: user_id.clone(),
            items,
            shipping_address: address,
            payment_method,
            payment_status: PaymentStatus::Pending,
            status: OrderStatus::Pending,
            subtotal,
            shipping_cost: shipping,
            tax,
            total,
            created_at: now,
            updated_at: now,
            tracking_number: None,
            notes,
        };

        self.orders.insert(order.clone())?;
        self.persist_confirmation(&order)?;
        self.cart.clear()?;

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            total = %order.total,
            "Order placed"
        );
        Ok(order)
    }

    /// The most recent confirmation snapshot, if one was ever persisted.
    ///
    /// Missing or malformed keys yield `None` rather than an error; the
    /// confirmation view falls back to an empty state.
    #[must_use]
    pub fn last_confirmation(&self) -> Option<OrderConfirmation> {
        let order_id: OrderId = self.storage.get(keys::LAST_ORDER_ID)?;
        let order_date: String = self.storage.get(keys::LAST_ORDER_DATE)?;
        let items: Vec<OrderItem> = self.storage.get(keys::LAST_ORDER_ITEMS)?;
        let shipping_address: ShippingAddress = self.storage.get(keys::LAST_SHIPPING_ADDRESS)?;
        let payment_method: PaymentMethod = self.storage.get(keys::LAST_PAYMENT_METHOD)?;

        let subtotal: Price = items.iter().map(OrderItem::line_total).sum();
        let shipping = shipping_cost(subtotal);
        Some(OrderConfirmation {
            order_id,
            order_date,
            items,
            shipping_address,
            payment_method,
            subtotal,
            shipping_cost: shipping,
            total: subtotal + shipping,
        })
    }

    // The snapshot keys are shared, not per-user: the confirmation view
    // always shows the latest order placed on this install.
    fn persist_confirmation(&self, order: &Order) -> Result<(), StorageError> {
        self.storage.set(keys::LAST_ORDER_ID, &order.id)?;
        self.storage
            .set(keys::LAST_ORDER_DATE, &format_order_date(&order.created_at))?;
        self.storage.set(keys::LAST_ORDER_ITEMS, &order.items)?;
        self.storage
            .set(keys::LAST_SHIPPING_ADDRESS, &order.shipping_address)?;
        self.storage
            .set(keys::LAST_PAYMENT_METHOD, &order.payment_method)?;
        Ok(())
    }
}

/// `ORD-` followed by a zero-padded seven-digit random number.
fn generate_order_id() -> OrderId {
    let n: u32 = rand::rng().random_range(0..10_000_000);
    OrderId::new(format!("ORD-{n:07}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::address::fixtures::valid_address;
    use crate::models::product::fixtures::sample_product;

    fn harness() -> (tempfile::TempDir, Arc<CartStore>, CheckoutService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Arc::new(KvStore::open(dir.path().join("data.json")).expect("open"));
        let cart = Arc::new(CartStore::new(Arc::clone(&storage)));
        cart.set_user(Some(&UserId::new("u1")));
        let orders = Arc::new(OrderService::new(Arc::clone(&storage)));
        let checkout = CheckoutService::new(storage, Arc::clone(&cart), orders);
        (dir, cart, checkout)
    }

    #[test]
    fn test_order_date_single_digit_day_not_padded() {
        use chrono::TimeZone;
        let date = Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).single().expect("date");
        assert_eq!(format_order_date(&date), "August 3, 2026");
    }

    #[test]
    fn test_shipping_cost_threshold() {
        assert_eq!(shipping_cost(Price::from_rupees(998)), FLAT_SHIPPING_FEE);
        assert_eq!(shipping_cost(Price::from_rupees(999)), Price::ZERO);
        assert_eq!(shipping_cost(Price::from_rupees(2500)), Price::ZERO);
    }

    #[test]
    fn test_place_order_below_threshold_adds_fee() {
        let (_dir, cart, checkout) = harness();
        cart.add_item(&sample_product("3", 899), 1).expect("add");

        let order = checkout
            .place_order(&UserId::new("u1"), valid_address(), PaymentMethod::Online, None)
            .expect("place");

        assert_eq!(order.subtotal, Price::from_rupees(899));
        assert_eq!(order.shipping_cost, Price::from_rupees(99));
        assert_eq!(order.tax, Price::ZERO);
        assert_eq!(order.total, Price::from_rupees(998));
    }

    #[test]
    fn test_place_order_at_threshold_ships_free() {
        let (_dir, cart, checkout) = harness();
        cart.add_item(&sample_product("4", 999), 1).expect("add");

        let order = checkout
            .place_order(&UserId::new("u1"), valid_address(), PaymentMethod::Cod, None)
            .expect("place");

        assert_eq!(order.shipping_cost, Price::ZERO);
        assert_eq!(order.total, Price::from_rupees(999));
    }

    #[test]
    fn test_place_order_empties_cart_but_keeps_snapshot() {
        let (_dir, cart, checkout) = harness();
        cart.add_item(&sample_product("1", 1299), 2).expect("add");

        let order = checkout
            .place_order(&UserId::new("u1"), valid_address(), PaymentMethod::Online, None)
            .expect("place");

        assert_eq!(cart.total_items(), 0);

        let confirmation = checkout.last_confirmation().expect("confirmation");
        assert_eq!(confirmation.order_id, order.id);
        assert_eq!(confirmation.items.len(), 1);
        assert_eq!(confirmation.total, order.total);
    }

    #[test]
    fn test_order_id_shape() {
        let (_dir, cart, checkout) = harness();
        cart.add_item(&sample_product("1", 1299), 1).expect("add");

        let order = checkout
            .place_order(&UserId::new("u1"), valid_address(), PaymentMethod::Online, None)
            .expect("place");

        let id = order.id.as_str();
        assert!(id.starts_with("ORD-"));
        assert_eq!(id.len(), 11);
        assert!(id[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let (_dir, _cart, checkout) = harness();
        let result = checkout.place_order(&UserId::new("u1"), valid_address(), PaymentMethod::Online, None);
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn test_invalid_address_rejected_before_cart_check() {
        let (_dir, cart, checkout) = harness();
        cart.add_item(&sample_product("1", 1299), 1).expect("add");

        let mut address = valid_address();
        address.phone_number = "12345".to_owned();
        let result = checkout.place_order(&UserId::new("u1"), address, PaymentMethod::Online, None);

        assert!(matches!(result, Err(CheckoutError::Validation(_))));
        // Failed checkout leaves the cart untouched.
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_item_prices_captured_at_order_time() {
        let (_dir, cart, checkout) = harness();
        cart.add_item(&sample_product("1", 1299), 3).expect("add");

        let order = checkout
            .place_order(&UserId::new("u1"), valid_address(), PaymentMethod::Online, None)
            .expect("place");

        let item = order.items.first().expect("item");
        assert_eq!(item.price, Price::from_rupees(1299));
        assert_eq!(item.line_total(), Price::from_rupees(3897));
    }
}
