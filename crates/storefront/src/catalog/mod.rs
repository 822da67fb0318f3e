//! Product catalog with simulated asynchronous lookup.
//!
//! The catalog is a static in-memory list standing in for a product service.
//! Lookups resolve after a short simulated delay (disabled in tests) so the
//! rest of the storefront is written against a genuinely asynchronous,
//! cancellable data source: every lookup takes a [`CancellationToken`] keyed
//! to the active view, and a fetch that loses the race to a navigation
//! resolves as [`CatalogError::Cancelled`] with its result discarded rather
//! than clobbering newer state.

pub mod filter;
pub mod seed;

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use skinaura_core::{ProductCategory, ProductId};

use crate::models::Product;

pub use filter::{ProductFilter, SortBy};

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the requested id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The lookup was cancelled before it resolved.
    #[error("catalog fetch cancelled")]
    Cancelled,
}

/// Simulated latency tiers, mirroring a remote catalog's response times.
#[derive(Debug, Clone, Copy)]
pub struct LatencyProfile {
    /// Full catalog listing.
    pub list: Duration,
    /// Single product lookup and flag-based lists.
    pub lookup: Duration,
    /// Category and search queries.
    pub query: Duration,
}

impl LatencyProfile {
    /// The latency tiers the storefront simulates in production mode.
    #[must_use]
    pub const fn simulated() -> Self {
        Self {
            list: Duration::from_millis(500),
            lookup: Duration::from_millis(300),
            query: Duration::from_millis(400),
        }
    }

    /// No artificial delay (tests).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            lookup: Duration::ZERO,
            query: Duration::ZERO,
        }
    }
}

/// The product catalog service.
pub struct Catalog {
    products: Vec<Product>,
    latency: LatencyProfile,
}

impl Catalog {
    /// Create a catalog over the seed product list.
    #[must_use]
    pub fn new(latency: LatencyProfile) -> Self {
        Self::with_products(seed::products(), latency)
    }

    /// Create a catalog over an explicit product list.
    #[must_use]
    pub const fn with_products(products: Vec<Product>, latency: LatencyProfile) -> Self {
        Self { products, latency }
    }

    /// All products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Cancelled`] if `cancel` fires first.
    pub async fn all(&self, cancel: &CancellationToken) -> Result<Vec<Product>, CatalogError> {
        self.resolve(self.latency.list, cancel, |products| products.to_vec())
            .await
    }

    /// Look up a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, or
    /// [`CatalogError::Cancelled`] if `cancel` fires first.
    #[instrument(skip(self, cancel), fields(id = %id))]
    pub async fn by_id(
        &self,
        id: &ProductId,
        cancel: &CancellationToken,
    ) -> Result<Product, CatalogError> {
        self.resolve(self.latency.lookup, cancel, |products| {
            products.iter().find(|p| &p.id == id).cloned()
        })
        .await?
        .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Products in one category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Cancelled`] if `cancel` fires first.
    pub async fn by_category(
        &self,
        category: ProductCategory,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>, CatalogError> {
        self.resolve(self.latency.query, cancel, |products| {
            products
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect()
        })
        .await
    }

    /// Products flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Cancelled`] if `cancel` fires first.
    pub async fn featured(&self, cancel: &CancellationToken) -> Result<Vec<Product>, CatalogError> {
        self.flagged(cancel, |p| p.featured).await
    }

    /// Products flagged as best sellers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Cancelled`] if `cancel` fires first.
    pub async fn best_selling(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>, CatalogError> {
        self.flagged(cancel, |p| p.best_seller).await
    }

    /// Products flagged as new arrivals.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Cancelled`] if `cancel` fires first.
    pub async fn new_arrivals(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>, CatalogError> {
        self.flagged(cancel, |p| p.new_arrival).await
    }

    /// Case-insensitive search over name, description, and category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Cancelled`] if `cancel` fires first.
    #[instrument(skip(self, cancel))]
    pub async fn search(
        &self,
        term: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>, CatalogError> {
        self.resolve(self.latency.query, cancel, |products| {
            products
                .iter()
                .filter(|p| filter::matches_search(p, term))
                .cloned()
                .collect()
        })
        .await
    }

    /// Filtered, sorted listing over the full catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Cancelled`] if `cancel` fires first.
    #[instrument(skip(self, cancel))]
    pub async fn listing(
        &self,
        product_filter: &ProductFilter,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>, CatalogError> {
        self.resolve(self.latency.list, cancel, |products| {
            filter::apply(products, product_filter)
        })
        .await
    }

    async fn flagged(
        &self,
        cancel: &CancellationToken,
        flag: impl Fn(&&Product) -> bool,
    ) -> Result<Vec<Product>, CatalogError> {
        self.resolve(self.latency.lookup, cancel, |products| {
            products.iter().filter(&flag).cloned().collect()
        })
        .await
    }

    async fn resolve<T>(
        &self,
        delay: Duration,
        cancel: &CancellationToken,
        op: impl FnOnce(&[Product]) -> T,
    ) -> Result<T, CatalogError> {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Catalog fetch cancelled before resolving");
                Err(CatalogError::Cancelled)
            }
            () = tokio::time::sleep(delay) => Ok(op(&self.products)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(LatencyProfile::none())
    }

    fn token() -> CancellationToken {
        CancellationToken::new()
    }

    #[tokio::test]
    async fn test_all_returns_catalog() {
        let products = catalog().all(&token()).await.expect("all");
        assert_eq!(products.len(), 9);
    }

    #[tokio::test]
    async fn test_by_id_found_and_missing() {
        let catalog = catalog();
        let product = catalog
            .by_id(&ProductId::new("5"), &token())
            .await
            .expect("known id");
        assert_eq!(product.name, "SPF 50 Lightweight Sunscreen");

        let missing = catalog.by_id(&ProductId::new("404"), &token()).await;
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_by_category() {
        let serums = catalog()
            .by_category(ProductCategory::FaceSerum, &token())
            .await
            .expect("category");
        assert_eq!(serums.len(), 3);
    }

    #[tokio::test]
    async fn test_flag_lists() {
        let catalog = catalog();
        assert_eq!(catalog.featured(&token()).await.expect("featured").len(), 3);
        assert_eq!(
            catalog.best_selling(&token()).await.expect("best").len(),
            2
        );
        assert_eq!(
            catalog.new_arrivals(&token()).await.expect("new").len(),
            2
        );
    }

    #[tokio::test]
    async fn test_search_case_insensitive() {
        let results = catalog().search("RETINOL", &token()).await.expect("search");
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().map(|p| p.id.as_str()), Some("7"));
    }

    #[tokio::test]
    async fn test_cancelled_fetch_yields_no_result() {
        // Real latency so cancellation wins the race.
        let catalog = Catalog::with_products(seed::products(), LatencyProfile::simulated());
        let cancel = token();
        cancel.cancel();
        let result = catalog.all(&cancel).await;
        assert!(matches!(result, Err(CatalogError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_mid_flight() {
        let catalog = Catalog::with_products(seed::products(), LatencyProfile::simulated());
        let cancel = token();
        let fetch = catalog.all(&cancel);
        let canceller = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cancel.cancel();
        };
        let (result, ()) = tokio::join!(fetch, canceller);
        assert!(matches!(result, Err(CatalogError::Cancelled)));
    }
}
