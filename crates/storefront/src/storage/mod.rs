//! Key-value persistence for storefront state.
//!
//! All per-user state (session, carts, wishlists, addresses, orders) lives in
//! a single string-keyed, JSON-valued store persisted to one file on disk,
//! standing in for a backend that does not exist in this codebase. Writes go
//! through on every mutation; concurrent writers are not coordinated beyond
//! the in-process lock (last write wins).
//!
//! # Keys
//!
//! - `currentUser` - current authenticated user
//! - `cart_{userId}` - cart lines
//! - `wishlist_{userId}` - wishlist products
//! - `addresses_{userId}` - saved addresses
//! - `orders` - all placed orders
//! - `lastOrderId` / `lastOrderDate` / `lastOrderItems` /
//!   `lastShippingAddress` / `lastPaymentMethod` - last-placed-order
//!   snapshot (not user-scoped)

pub mod keys;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for writing.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string-keyed JSON store persisted to a single file.
///
/// Malformed persisted data is never fatal: a corrupt file or a corrupt
/// individual value is discarded with a warning and treated as absent.
pub struct KvStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, serde_json::Value>>,
}

impl KvStore {
    /// Open a store backed by the given file, loading any existing contents.
    ///
    /// A missing file starts the store empty. A file that fails to parse is
    /// discarded (logged, not surfaced) and the store starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let data = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt storage file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Read and deserialize the value under `key`.
    ///
    /// Returns `None` if the key is absent or the stored value does not
    /// deserialize as `T` (corruption is logged and discarded).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        let value = guard.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding corrupt stored value");
                None
            }
        }
    }

    /// Serialize and write `value` under `key`, persisting immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_value(value)?;
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_owned(), json);
        self.flush(&guard)
    }

    /// Remove `key` if present, persisting immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the file write fails.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if guard.remove(key).is_some() {
            self.flush(&guard)?;
        }
        Ok(())
    }

    /// Whether `key` currently holds a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, data: &BTreeMap<String, serde_json::Value>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}
