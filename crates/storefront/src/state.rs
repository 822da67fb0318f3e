//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, LatencyProfile};
use crate::config::StorefrontConfig;
use crate::services::{
    AddressBook, CartStore, CheckoutService, OrderService, SessionService, WishlistStore,
};
use crate::storage::{KvStore, StorageError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// storage-backed services and the product catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    sessions: SessionService,
    cart: Arc<CartStore>,
    wishlist: Arc<WishlistStore>,
    addresses: AddressBook,
    orders: Arc<OrderService>,
    checkout: CheckoutService,
}

impl AppState {
    /// Create a new application state, opening the data file and
    /// re-hydrating any persisted session into the cart and wishlist stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be opened or created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let storage = Arc::new(KvStore::open(&config.data_path)?);

        let latency = if config.simulated_latency {
            LatencyProfile::simulated()
        } else {
            LatencyProfile::none()
        };
        let catalog = Catalog::new(latency);

        let sessions = SessionService::new(Arc::clone(&storage));
        let cart = Arc::new(CartStore::new(Arc::clone(&storage)));
        let wishlist = Arc::new(WishlistStore::new(Arc::clone(&storage)));
        let addresses = AddressBook::new(Arc::clone(&storage));
        let orders = Arc::new(OrderService::new(Arc::clone(&storage)));
        let checkout = CheckoutService::new(
            Arc::clone(&storage),
            Arc::clone(&cart),
            Arc::clone(&orders),
        );

        // A session that survived a restart drives the stores immediately.
        let current = sessions.current().map(|u| u.id);
        cart.set_user(current.as_ref());
        wishlist.set_user(current.as_ref());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                sessions,
                cart,
                wishlist,
                addresses,
                orders,
                checkout,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the session service.
    #[must_use]
    pub fn sessions(&self) -> &SessionService {
        &self.inner.sessions
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Get a reference to the address book.
    #[must_use]
    pub fn addresses(&self) -> &AddressBook {
        &self.inner.addresses
    }

    /// Get a reference to the order service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }
}
