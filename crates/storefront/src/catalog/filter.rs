//! Product listing filters and sorting.
//!
//! Filtering is a pure function over a product slice; it reads no store
//! state, so listing results can never go stale against the catalog.

use serde::Deserialize;

use skinaura_core::{Price, ProductCategory};

use crate::models::Product;

/// Sort orders for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortBy {
    #[serde(rename = "price-low-high")]
    PriceLowHigh,
    #[serde(rename = "price-high-low")]
    PriceHighLow,
    #[serde(rename = "newest")]
    Newest,
    #[default]
    #[serde(rename = "popularity")]
    Popularity,
}

/// Listing criteria applied over the catalog.
///
/// All criteria are optional; an empty filter returns the catalog in
/// popularity order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    /// Restrict to one category; `None` means all.
    pub category: Option<ProductCategory>,
    /// Inclusive lower price bound.
    pub min_price: Option<Price>,
    /// Inclusive upper price bound.
    pub max_price: Option<Price>,
    /// Only products with stock remaining.
    pub in_stock: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub search_term: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }
        if let Some(min) = self.min_price
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price > max
        {
            return false;
        }
        if self.in_stock == Some(true) && !product.in_stock() {
            return false;
        }
        if let Some(term) = &self.search_term
            && !term.trim().is_empty()
            && !matches_search(product, term)
        {
            return false;
        }
        true
    }
}

/// Case-insensitive match over name, description, and category display name.
pub(crate) fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.to_lowercase();
    product.name.to_lowercase().contains(&term)
        || product.description.to_lowercase().contains(&term)
        || product.category.as_str().to_lowercase().contains(&term)
}

/// Apply `filter` to `products`, returning matches in the requested order.
#[must_use]
pub fn apply(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let mut matched: Vec<Product> = products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();

    match filter.sort_by.unwrap_or_default() {
        SortBy::PriceLowHigh => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceHighLow => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        // Stable sort keeps catalog order within each group.
        SortBy::Newest => matched.sort_by_key(|p| !p.new_arrival),
        SortBy::Popularity => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_all_by_popularity() {
        let catalog = seed::products();
        let result = apply(&catalog, &ProductFilter::default());
        assert_eq!(result.len(), catalog.len());
        // Highest-rated first.
        assert_eq!(result.first().map(|p| p.id.as_str()), Some("2"));
    }

    #[test]
    fn test_category_filter() {
        let catalog = seed::products();
        let filter = ProductFilter {
            category: Some(ProductCategory::FaceWash),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter);
        assert!(!result.is_empty());
        assert!(
            result
                .iter()
                .all(|p| p.category == ProductCategory::FaceWash)
        );
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let catalog = seed::products();
        let filter = ProductFilter {
            min_price: Some(Price::from_rupees(899)),
            max_price: Some(Price::from_rupees(999)),
            sort_by: Some(SortBy::PriceLowHigh),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter);
        assert_eq!(ids(&result), vec!["3", "8", "4"]);
    }

    #[test]
    fn test_sort_price_high_low() {
        let catalog = seed::products();
        let filter = ProductFilter {
            sort_by: Some(SortBy::PriceHighLow),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter);
        assert_eq!(result.first().map(|p| p.id.as_str()), Some("7"));
    }

    #[test]
    fn test_sort_newest_puts_new_arrivals_first() {
        let catalog = seed::products();
        let filter = ProductFilter {
            sort_by: Some(SortBy::Newest),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter);
        assert_eq!(ids(&result).first(), Some(&"7"));
        assert!(result.get(1).is_some_and(|p| p.new_arrival));
        assert!(result.get(2).is_some_and(|p| !p.new_arrival));
    }

    #[test]
    fn test_search_term_matches_category_name() {
        let catalog = seed::products();
        let filter = ProductFilter {
            search_term: Some("sun screen".to_owned()),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter);
        assert!(!result.is_empty());
        assert!(
            result
                .iter()
                .all(|p| p.category == ProductCategory::SunScreen)
        );
    }

    #[test]
    fn test_in_stock_filter() {
        let mut catalog = seed::products();
        if let Some(first) = catalog.first_mut() {
            first.stock = 0;
        }
        let filter = ProductFilter {
            in_stock: Some(true),
            ..ProductFilter::default()
        };
        let result = apply(&catalog, &filter);
        assert_eq!(result.len(), catalog.len() - 1);
        assert!(result.iter().all(Product::in_stock));
    }
}
