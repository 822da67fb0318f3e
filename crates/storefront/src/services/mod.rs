//! Service objects for per-user storefront state.
//!
//! Each service is constructed once at startup and handed around by
//! reference through [`crate::state::AppState`]; nothing here reaches for
//! ambient globals. The cart and wishlist stores hold the current user's
//! collection in memory and write through to [`crate::storage::KvStore`] on
//! every mutation.

pub mod addresses;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod session;
pub mod wishlist;

pub use addresses::AddressBook;
pub use cart::CartStore;
pub use checkout::CheckoutService;
pub use orders::OrderService;
pub use session::SessionService;
pub use wishlist::WishlistStore;

use serde::Serialize;

/// A user-visible confirmation emitted by a store mutation.
///
/// Mirrors the toast the UI shows; the API returns it alongside the mutated
/// state so the client does not invent its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub(crate) fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
