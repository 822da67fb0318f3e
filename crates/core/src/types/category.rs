//! Product category enumeration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of product categories carried by the storefront.
///
/// Serialized with the display names used in catalog data and storage
/// (`"Face Serum"`, `"Face Wash"`, `"Sun Screen"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "Face Serum")]
    FaceSerum,
    #[serde(rename = "Face Wash")]
    FaceWash,
    #[serde(rename = "Sun Screen")]
    SunScreen,
}

impl ProductCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 3] = [Self::FaceSerum, Self::FaceWash, Self::SunScreen];

    /// Display name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FaceSerum => "Face Serum",
            Self::FaceWash => "Face Wash",
            Self::SunScreen => "Sun Screen",
        }
    }

    /// Parse a category from its display name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Face Serum" => Some(Self::FaceSerum),
            "Face Wash" => Some(Self::FaceWash),
            "Sun Screen" => Some(Self::SunScreen),
            _ => None,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
