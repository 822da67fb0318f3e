//! Product and cart-line models.

use serde::{Deserialize, Serialize};

use skinaura_core::{Price, ProductCategory, ProductId};

/// A catalog product.
///
/// Immutable from the storefront's perspective; only the admin collaborator
/// mutates products, and that surface is out of scope here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image reference (path or URL), not fetched by this service.
    pub image: String,
    pub category: ProductCategory,
    pub stock: u32,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
    pub num_reviews: u32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub best_seller: bool,
    #[serde(default, rename = "new", skip_serializing_if = "is_false")]
    pub new_arrival: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde skip_serializing_if signature
const fn is_false(b: &bool) -> bool {
    !*b
}

impl Product {
    /// Whether the product can currently be purchased.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One (product, quantity) pairing inside a user's cart.
///
/// Invariant: a cart holds at most one line per distinct product id, and
/// `quantity >= 1` (a quantity reduced to zero removes the line).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line at the product's current price.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price * self.quantity
    }
}
