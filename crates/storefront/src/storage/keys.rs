//! Storage key layout.
//!
//! Key builders live here so the per-user namespacing is impossible to get
//! wrong at call sites. The `lastOrder*` keys are deliberately not user
//! scoped: the confirmation view always shows the latest order placed on
//! this install.

use skinaura_core::UserId;

/// Current authenticated user.
pub const CURRENT_USER: &str = "currentUser";

/// All placed orders.
pub const ORDERS: &str = "orders";

/// Last-placed-order snapshot keys (shared across users).
pub const LAST_ORDER_ID: &str = "lastOrderId";
pub const LAST_ORDER_DATE: &str = "lastOrderDate";
pub const LAST_ORDER_ITEMS: &str = "lastOrderItems";
pub const LAST_SHIPPING_ADDRESS: &str = "lastShippingAddress";
pub const LAST_PAYMENT_METHOD: &str = "lastPaymentMethod";

/// Cart lines for one user.
#[must_use]
pub fn cart(user_id: &UserId) -> String {
    format!("cart_{user_id}")
}

/// Wishlist products for one user.
#[must_use]
pub fn wishlist(user_id: &UserId) -> String {
    format!("wishlist_{user_id}")
}

/// Saved addresses for one user.
#[must_use]
pub fn addresses(user_id: &UserId) -> String {
    format!("addresses_{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_user_namespacing() {
        let alice = UserId::new("a1");
        let bob = UserId::new("b2");
        assert_eq!(cart(&alice), "cart_a1");
        assert_ne!(cart(&alice), cart(&bob));
        assert_eq!(wishlist(&bob), "wishlist_b2");
        assert_eq!(addresses(&alice), "addresses_a1");
    }
}
