//! Cart store.
//!
//! Holds the current user's cart lines in memory and writes through to
//! per-user storage (`cart_{userId}`) on every mutation. Totals are derived
//! on every read, never cached. None of the mutations can fail under normal
//! input; the only error surface is persistence itself.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skinaura_core::{Price, ProductId, UserId};

use crate::models::{CartLine, Product};
use crate::storage::{KvStore, StorageError, keys};

use super::Notice;

#[derive(Default)]
struct CartState {
    user: Option<UserId>,
    lines: Vec<CartLine>,
}

/// The cart store.
pub struct CartStore {
    storage: Arc<KvStore>,
    state: Mutex<CartState>,
}

impl CartStore {
    /// Create an empty store. Call [`CartStore::set_user`] to load a user's
    /// persisted cart.
    #[must_use]
    pub fn new(storage: Arc<KvStore>) -> Self {
        Self {
            storage,
            state: Mutex::new(CartState::default()),
        }
    }

    /// Switch identity: discard in-memory state and load the new user's
    /// persisted cart. `None` (logout) clears memory without touching any
    /// persisted keys.
    pub fn set_user(&self, user_id: Option<&UserId>) {
        let mut state = self.lock();
        state.lines = match user_id {
            // Corrupt persisted carts are discarded by the store (logged).
            Some(id) => self.storage.get(&keys::cart(id)).unwrap_or_default(),
            None => Vec::new(),
        };
        state.user = user_id.cloned();
    }

    /// Add `quantity` of `product`.
    ///
    /// If the product is already in the cart the existing line's quantity is
    /// incremented; the cart never holds two lines for one product.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the cart fails.
    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<Notice, StorageError> {
        let quantity = quantity.max(1);
        let mut state = self.lock();
        match state.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += quantity,
            None => state.lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
        self.persist(&state)?;
        Ok(Notice::new(
            "Added to Cart",
            format!("{} has been added to your cart.", product.name),
        ))
    }

    /// Replace the quantity of the line for `product_id`.
    ///
    /// A quantity of zero (or less, at the API boundary) behaves as
    /// [`CartStore::remove_item`]. An absent product id is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the cart fails.
    pub fn update_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), StorageError> {
        if quantity == 0 {
            self.remove_item(product_id)?;
            return Ok(());
        }

        let mut state = self.lock();
        if let Some(line) = state.lines.iter_mut().find(|l| &l.product.id == product_id) {
            line.quantity = quantity;
            self.persist(&state)?;
        }
        Ok(())
    }

    /// Remove the line for `product_id`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the cart fails.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<Notice, StorageError> {
        let mut state = self.lock();
        state.lines.retain(|l| &l.product.id != product_id);
        self.persist(&state)?;
        Ok(Notice::new(
            "Item Removed",
            "The item has been removed from your cart.",
        ))
    }

    /// Empty the cart and remove its persisted key.
    ///
    /// # Errors
    ///
    /// Returns an error only if removing the persisted key fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.lines.clear();
        if let Some(user) = &state.user {
            self.storage.remove(&keys::cart(user))?;
        }
        Ok(())
    }

    /// Whether `product_id` has a line in the cart.
    #[must_use]
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.lock().lines.iter().any(|l| &l.product.id == product_id)
    }

    /// Snapshot of the current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().lines.clone()
    }

    /// Sum of quantities across all lines. Recomputed on every call.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lock().lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of (current unit price x quantity) across all lines. Recomputed
    /// on every call.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lock().lines.iter().map(CartLine::line_price).sum()
    }

    fn persist(&self, state: &CartState) -> Result<(), StorageError> {
        let Some(user) = &state.user else {
            return Ok(());
        };
        let key = keys::cart(user);
        if state.lines.is_empty() {
            self.storage.remove(&key)
        } else {
            self.storage.set(&key, &state.lines)
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
