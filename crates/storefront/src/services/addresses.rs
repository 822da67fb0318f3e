//! Saved-address book.
//!
//! Per-user CRUD over `addresses_{userId}`. Reads go straight to storage
//! rather than through an in-memory mirror; the address book is touched far
//! less often than the cart and the simpler model wins.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use skinaura_core::{AddressId, UserId};

use crate::models::{SavedAddress, ShippingAddress, ValidationErrors};
use crate::storage::{KvStore, StorageError, keys};

/// Errors from address-book operations.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The address failed form validation.
    #[error("address failed validation")]
    Validation(ValidationErrors),

    /// No saved address with the given id.
    #[error("address not found: {0}")]
    NotFound(AddressId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The address book service.
pub struct AddressBook {
    storage: Arc<KvStore>,
}

impl AddressBook {
    #[must_use]
    pub const fn new(storage: Arc<KvStore>) -> Self {
        Self { storage }
    }

    /// All saved addresses for `user_id`, default first.
    #[must_use]
    pub fn list(&self, user_id: &UserId) -> Vec<SavedAddress> {
        let mut addresses: Vec<SavedAddress> = self
            .storage
            .get(&keys::addresses(user_id))
            .unwrap_or_default();
        addresses.sort_by_key(|a| !a.is_default);
        addresses
    }

    /// The user's default address, if one is set.
    #[must_use]
    pub fn default_address(&self, user_id: &UserId) -> Option<SavedAddress> {
        self.list(user_id).into_iter().find(|a| a.is_default)
    }

    /// Look up one saved address.
    #[must_use]
    pub fn get(&self, user_id: &UserId, id: &AddressId) -> Option<SavedAddress> {
        self.list(user_id).into_iter().find(|a| &a.id == id)
    }

    /// Validate and save a new address. The first address a user saves
    /// becomes their default.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Validation`] with the field-error map if the
    /// address is invalid, or a storage error if persisting fails.
    pub fn add(
        &self,
        user_id: &UserId,
        address: ShippingAddress,
    ) -> Result<SavedAddress, AddressError> {
        address.validate().map_err(AddressError::Validation)?;

        let mut addresses = self.list(user_id);
        let saved = SavedAddress {
            id: AddressId::new(Uuid::new_v4().to_string()),
            address,
            is_default: addresses.is_empty(),
        };
        addresses.push(saved.clone());
        self.persist(user_id, &addresses)?;
        Ok(saved)
    }

    /// Remove a saved address.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::NotFound`] if the id is unknown, or a storage
    /// error if persisting fails.
    pub fn remove(&self, user_id: &UserId, id: &AddressId) -> Result<(), AddressError> {
        let mut addresses = self.list(user_id);
        let before = addresses.len();
        addresses.retain(|a| &a.id != id);
        if addresses.len() == before {
            return Err(AddressError::NotFound(id.clone()));
        }
        self.persist(user_id, &addresses)?;
        Ok(())
    }

    /// Mark one address as the default, unsetting any previous default.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::NotFound`] if the id is unknown, or a storage
    /// error if persisting fails.
    pub fn set_default(&self, user_id: &UserId, id: &AddressId) -> Result<(), AddressError> {
        let mut addresses = self.list(user_id);
        if !addresses.iter().any(|a| &a.id == id) {
            return Err(AddressError::NotFound(id.clone()));
        }
        for address in &mut addresses {
            address.is_default = &address.id == id;
        }
        self.persist(user_id, &addresses)?;
        Ok(())
    }

    fn persist(&self, user_id: &UserId, addresses: &[SavedAddress]) -> Result<(), StorageError> {
        let key = keys::addresses(user_id);
        if addresses.is_empty() {
            self.storage.remove(&key)
        } else {
            self.storage.set(&key, &addresses)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::address::fixtures::valid_address;

    fn book() -> (tempfile::TempDir, AddressBook, UserId) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Arc::new(KvStore::open(dir.path().join("data.json")).expect("open"));
        (dir, AddressBook::new(storage), UserId::new("u1"))
    }

    #[test]
    fn test_first_address_becomes_default() {
        let (_dir, book, user) = book();
        let first = book.add(&user, valid_address()).expect("add");
        assert!(first.is_default);

        let mut second_addr = valid_address();
        second_addr.city = "Pune".to_owned();
        let second = book.add(&user, second_addr).expect("add");
        assert!(!second.is_default);
    }

    #[test]
    fn test_set_default_unsets_previous() {
        let (_dir, book, user) = book();
        let first = book.add(&user, valid_address()).expect("add");
        let second = book.add(&user, valid_address()).expect("add");

        book.set_default(&user, &second.id).expect("set default");

        let addresses = book.list(&user);
        let defaults: Vec<_> = addresses.iter().filter(|a| a.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.first().map(|a| a.id.clone()), Some(second.id));
        assert!(
            addresses
                .iter()
                .find(|a| a.id == first.id)
                .is_some_and(|a| !a.is_default)
        );
    }

    #[test]
    fn test_list_puts_default_first() {
        let (_dir, book, user) = book();
        book.add(&user, valid_address()).expect("add");
        let second = book.add(&user, valid_address()).expect("add");
        book.set_default(&user, &second.id).expect("set default");

        let addresses = book.list(&user);
        assert_eq!(addresses.first().map(|a| a.id.clone()), Some(second.id));
    }

    #[test]
    fn test_add_rejects_invalid() {
        let (_dir, book, user) = book();
        let mut address = valid_address();
        address.zip_code = "40001".to_owned();
        let result = book.add(&user, address);
        assert!(matches!(result, Err(AddressError::Validation(_))));
        assert!(book.list(&user).is_empty());
    }

    #[test]
    fn test_remove_unknown_id() {
        let (_dir, book, user) = book();
        let result = book.remove(&user, &AddressId::new("nope"));
        assert!(matches!(result, Err(AddressError::NotFound(_))));
    }
}
