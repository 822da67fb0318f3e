//! Seed catalog data.
//!
//! The storefront carries a fixed nine-product catalog; there is no product
//! CRUD on this side, so the data lives in code.

use skinaura_core::{Price, ProductCategory, ProductId};

use crate::models::Product;

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: i64,
    category: ProductCategory,
    stock: u32,
    rating: f32,
    num_reviews: u32,
    featured: bool,
    best_seller: bool,
    new_arrival: bool,
}

impl Seed {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        price: i64,
        category: ProductCategory,
        stock: u32,
        rating: f32,
        num_reviews: u32,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            category,
            stock,
            rating,
            num_reviews,
            featured: false,
            best_seller: false,
            new_arrival: false,
        }
    }

    const fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    const fn best_seller(mut self) -> Self {
        self.best_seller = true;
        self
    }

    const fn new_arrival(mut self) -> Self {
        self.new_arrival = true;
        self
    }
}

const SEEDS: [Seed; 9] = [
    Seed::new(
        "1",
        "Hydrating Face Serum",
        "A lightweight serum that deeply hydrates and plumps the skin with hyaluronic acid and vitamin B5.",
        1299,
        ProductCategory::FaceSerum,
        25,
        4.7,
        128,
    )
    .featured()
    .best_seller(),
    Seed::new(
        "2",
        "Vitamin C Brightening Serum",
        "Powerful antioxidant serum that brightens skin tone, reduces hyperpigmentation, and boosts collagen production.",
        1499,
        ProductCategory::FaceSerum,
        18,
        4.9,
        94,
    )
    .featured(),
    Seed::new(
        "3",
        "Gentle Foaming Cleanser",
        "A gentle face wash that effectively removes impurities without stripping the skin's natural moisture.",
        899,
        ProductCategory::FaceWash,
        32,
        4.5,
        76,
    ),
    Seed::new(
        "4",
        "Exfoliating Face Wash",
        "Removes dead skin cells and unclogs pores with natural exfoliants for a smoother complexion.",
        999,
        ProductCategory::FaceWash,
        22,
        4.6,
        63,
    )
    .best_seller(),
    Seed::new(
        "5",
        "SPF 50 Lightweight Sunscreen",
        "Broad-spectrum protection with a lightweight formula that blends seamlessly into all skin tones.",
        1199,
        ProductCategory::SunScreen,
        15,
        4.8,
        105,
    )
    .featured(),
    Seed::new(
        "6",
        "Hydrating SPF 30 Sunscreen",
        "Daily protection with added hydration for dry skin types, enriched with niacinamide and ceramides.",
        1099,
        ProductCategory::SunScreen,
        20,
        4.4,
        89,
    ),
    Seed::new(
        "7",
        "Retinol Repair Serum",
        "Night-time serum that diminishes fine lines and improves skin texture with stabilized retinol.",
        1699,
        ProductCategory::FaceSerum,
        12,
        4.7,
        72,
    )
    .new_arrival(),
    Seed::new(
        "8",
        "Oil Control Face Wash",
        "Balances oily skin and reduces shine without over-drying, featuring salicylic acid and tea tree oil.",
        949,
        ProductCategory::FaceWash,
        28,
        4.3,
        54,
    ),
    Seed::new(
        "9",
        "Tinted SPF 40 Sunscreen",
        "Light coverage with sun protection, perfect for a natural look while protecting your skin.",
        1399,
        ProductCategory::SunScreen,
        17,
        4.6,
        48,
    )
    .new_arrival(),
];

/// Build the seed product list.
#[must_use]
pub fn products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            price: Price::from_rupees(seed.price),
            image: "/placeholder.svg".to_owned(),
            category: seed.category,
            stock: seed.stock,
            rating: seed.rating,
            num_reviews: seed.num_reviews,
            featured: seed.featured,
            best_seller: seed.best_seller,
            new_arrival: seed.new_arrival,
        })
        .collect()
}
