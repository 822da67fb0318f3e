//! Domain models for the storefront.
//!
//! Serde representations match the persisted storage format (camelCase
//! fields), so state written by one release re-hydrates in the next.

pub mod address;
pub mod order;
pub mod product;
pub mod user;

pub use address::{SavedAddress, ShippingAddress, ValidationErrors};
pub use order::{Order, OrderItem};
pub use product::{CartLine, Product};
pub use user::User;
