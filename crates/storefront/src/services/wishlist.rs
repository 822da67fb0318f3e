//! Wishlist store.
//!
//! Same shape as the cart store minus quantities: a per-user set of saved
//! products under `wishlist_{userId}`. Adding a product that is already
//! saved does not mutate state; it reports a distinct "already in wishlist"
//! outcome instead (deliberately asymmetric with the cart's
//! increment-on-duplicate behavior).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skinaura_core::{ProductId, UserId};

use crate::models::Product;
use crate::storage::{KvStore, StorageError, keys};

use super::Notice;

/// Outcome of a wishlist add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistAdd {
    /// The product was saved.
    Added(Notice),
    /// The product was already saved; state unchanged.
    AlreadyPresent(Notice),
}

impl WishlistAdd {
    /// The notice to show the user, whichever way the add went.
    #[must_use]
    pub const fn notice(&self) -> &Notice {
        match self {
            Self::Added(n) | Self::AlreadyPresent(n) => n,
        }
    }
}

#[derive(Default)]
struct WishlistState {
    user: Option<UserId>,
    items: Vec<Product>,
}

/// The wishlist store.
pub struct WishlistStore {
    storage: Arc<KvStore>,
    state: Mutex<WishlistState>,
}

impl WishlistStore {
    /// Create an empty store. Call [`WishlistStore::set_user`] to load a
    /// user's persisted wishlist.
    #[must_use]
    pub fn new(storage: Arc<KvStore>) -> Self {
        Self {
            storage,
            state: Mutex::new(WishlistState::default()),
        }
    }

    /// Switch identity: discard in-memory state and load the new user's
    /// persisted wishlist. `None` (logout) clears memory only.
    pub fn set_user(&self, user_id: Option<&UserId>) {
        let mut state = self.lock();
        state.items = match user_id {
            Some(id) => self.storage.get(&keys::wishlist(id)).unwrap_or_default(),
            None => Vec::new(),
        };
        state.user = user_id.cloned();
    }

    /// Save `product`, or report that it is already saved.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the wishlist fails.
    pub fn add_item(&self, product: &Product) -> Result<WishlistAdd, StorageError> {
        let mut state = self.lock();
        if state.items.iter().any(|p| p.id == product.id) {
            return Ok(WishlistAdd::AlreadyPresent(Notice::new(
                "Already in Wishlist",
                format!("{} is already in your wishlist.", product.name),
            )));
        }

        state.items.push(product.clone());
        self.persist(&state)?;
        Ok(WishlistAdd::Added(Notice::new(
            "Added to Wishlist",
            format!("{} has been added to your wishlist.", product.name),
        )))
    }

    /// Remove `product_id`, if saved.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the wishlist fails.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<Notice, StorageError> {
        let mut state = self.lock();
        state.items.retain(|p| &p.id != product_id);
        self.persist(&state)?;
        Ok(Notice::new(
            "Item Removed",
            "The item has been removed from your wishlist.",
        ))
    }

    /// Empty the wishlist and remove its persisted key.
    ///
    /// # Errors
    ///
    /// Returns an error only if removing the persisted key fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.items.clear();
        if let Some(user) = &state.user {
            self.storage.remove(&keys::wishlist(user))?;
        }
        Ok(())
    }

    /// Whether `product_id` is saved.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.lock().items.iter().any(|p| &p.id == product_id)
    }

    /// Snapshot of the saved products.
    #[must_use]
    pub fn items(&self) -> Vec<Product> {
        self.lock().items.clone()
    }

    fn persist(&self, state: &WishlistState) -> Result<(), StorageError> {
        let Some(user) = &state.user else {
            return Ok(());
        };
        let key = keys::wishlist(user);
        if state.items.is_empty() {
            self.storage.remove(&key)
        } else {
            self.storage.set(&key, &state.items)
        }
    }

    fn lock(&self) -> MutexGuard<'_, WishlistState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::fixtures::sample_product;

    fn store_for(user: &str) -> (tempfile::TempDir, WishlistStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Arc::new(KvStore::open(dir.path().join("data.json")).expect("open"));
        let store = WishlistStore::new(storage);
        store.set_user(Some(&UserId::new(user)));
        (dir, store)
    }

    #[test]
    fn test_add_is_idempotent() {
        let (_dir, wishlist) = store_for("u1");
        let product = sample_product("1", 1299);

        let first = wishlist.add_item(&product).expect("add");
        assert!(matches!(first, WishlistAdd::Added(_)));
        assert_eq!(wishlist.items().len(), 1);

        let second = wishlist.add_item(&product).expect("add again");
        assert!(matches!(second, WishlistAdd::AlreadyPresent(_)));
        assert_eq!(wishlist.items().len(), 1);
    }

    #[test]
    fn test_duplicate_add_notice_is_distinct() {
        let (_dir, wishlist) = store_for("u1");
        let product = sample_product("1", 1299);

        let first = wishlist.add_item(&product).expect("add");
        let second = wishlist.add_item(&product).expect("add again");
        assert_eq!(first.notice().title, "Added to Wishlist");
        assert_eq!(second.notice().title, "Already in Wishlist");
    }

    #[test]
    fn test_remove_and_membership() {
        let (_dir, wishlist) = store_for("u1");
        let product = sample_product("1", 1299);
        wishlist.add_item(&product).expect("add");
        assert!(wishlist.is_in_wishlist(&product.id));

        wishlist.remove_item(&product.id).expect("remove");
        assert!(!wishlist.is_in_wishlist(&product.id));
    }

    #[test]
    fn test_identity_switch_isolates_users() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Arc::new(KvStore::open(dir.path().join("data.json")).expect("open"));
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let wishlist = WishlistStore::new(Arc::clone(&storage));
        wishlist.set_user(Some(&alice));
        wishlist
            .add_item(&sample_product("1", 1299))
            .expect("add");

        wishlist.set_user(Some(&bob));
        assert!(wishlist.items().is_empty());

        // Logout leaves Alice's persisted key alone.
        wishlist.set_user(None);
        assert!(storage.contains(&keys::wishlist(&alice)));
    }
}
