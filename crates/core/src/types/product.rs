//! Catalog product records.
//!
//! The shape mirrors the backend `products` table as it is exposed over JSON,
//! so a catalog export can be read directly. The cart only looks at these
//! records when an item is added; it never keeps a live reference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Units available; zero or less means sold out.
    #[serde(default)]
    pub stock: i32,
    /// Product image location, if any.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Free-form category label.
    #[serde(default)]
    pub category: Option<String>,
}

impl CatalogProduct {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}
