//! Order persistence and status management.
//!
//! Orders are created exactly once by the checkout workflow and stored under
//! the shared `orders` key. After creation, the status fields (payment
//! status, fulfillment status, tracking number) are the only mutable parts;
//! line items, address, and totals never change.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use skinaura_core::{OrderId, OrderStatus, PaymentStatus, UserId};

use crate::models::Order;
use crate::storage::{KvStore, StorageError, keys};

/// Errors from order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No order with the given id.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A status mutation applied by the admin collaborator.
#[derive(Debug, Clone, Default)]
pub struct StatusUpdate {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub tracking_number: Option<String>,
}

/// The order service.
pub struct OrderService {
    storage: Arc<KvStore>,
}

impl OrderService {
    #[must_use]
    pub const fn new(storage: Arc<KvStore>) -> Self {
        Self { storage }
    }

    /// Persist a newly placed order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub fn insert(&self, order: Order) -> Result<(), StorageError> {
        let mut orders = self.all();
        orders.push(order);
        self.storage.set(keys::ORDERS, &orders)
    }

    /// One user's orders, newest first.
    #[must_use]
    pub fn for_user(&self, user_id: &UserId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .all()
            .into_iter()
            .filter(|o| &o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Look up one order.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<Order> {
        self.all().into_iter().find(|o| &o.id == id)
    }

    /// Apply a status mutation, touching `updated_at`. Items, address, and
    /// totals are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for an unknown id, or a storage
    /// error if persisting fails.
    #[instrument(skip(self), fields(id = %id))]
    pub fn update_status(&self, id: &OrderId, update: StatusUpdate) -> Result<Order, OrderError> {
        let mut orders = self.all();
        let order = orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;

        if let Some(status) = update.status {
            order.status = status;
        }
        if let Some(payment_status) = update.payment_status {
            order.payment_status = payment_status;
        }
        if let Some(tracking) = update.tracking_number {
            order.tracking_number = Some(tracking);
        }
        order.updated_at = Utc::now();

        let updated = order.clone();
        self.storage.set(keys::ORDERS, &orders)?;
        tracing::info!(order_id = %updated.id, status = ?updated.status, "Order status updated");
        Ok(updated)
    }

    fn all(&self) -> Vec<Order> {
        self.storage.get(keys::ORDERS).unwrap_or_default()
    }
}
