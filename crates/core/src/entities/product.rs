//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::specs::Specifications;
use crate::types::{Price, ProductId};

use super::lenient::null_as_default;

/// Categories the catalog form offers.
pub const PRODUCT_CATEGORIES: [&str; 6] = [
    "Laptop",
    "Smartphone",
    "Smartwatch",
    "Pc, Printer",
    "Accessory",
    "Tablet",
];

/// Resolve user input to one of [`PRODUCT_CATEGORIES`], ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn canonical_category(input: &str) -> Option<&'static str> {
    let input = input.trim();
    PRODUCT_CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(input))
}

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: ProductId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Price,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "stock_quantity", deserialize_with = "null_as_default")]
    pub stock: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub specifications: Specifications,
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub bestseller: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
}
