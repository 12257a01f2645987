//! Catalog provider.
//!
//! The cart consults the catalog only when an item is added; it copies what
//! it needs into the cart line and drops the record. [`StaticCatalog`] serves
//! a JSON export of the products table, which is all the CLI needs.

use std::collections::HashMap;
use std::path::Path;

use rabbit_cart_core::{CatalogProduct, ProductId};
use thiserror::Error;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading the catalog file failed.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a JSON array of products.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records share an id.
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// Read-only source of product records.
pub trait CatalogProvider {
    /// Look up a product by id.
    fn product(&self, id: &ProductId) -> Option<CatalogProduct>;

    /// All products, in catalog order.
    fn products(&self) -> Vec<CatalogProduct>;
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<CatalogProduct>,
    index: HashMap<ProductId, usize>,
}

impl StaticCatalog {
    /// Build a catalog from records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two records share an id.
    pub fn new(products: Vec<CatalogProduct>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, index })
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input and
    /// `CatalogError::DuplicateId` for repeated ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Replace or insert a record.
    pub fn upsert(&mut self, product: CatalogProduct) {
        if let Some(&position) = self.index.get(&product.id) {
            if let Some(slot) = self.products.get_mut(position) {
                *slot = product;
            }
        } else {
            self.index.insert(product.id.clone(), self.products.len());
            self.products.push(product);
        }
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogProvider for StaticCatalog {
    fn product(&self, id: &ProductId) -> Option<CatalogProduct> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
            .cloned()
    }

    fn products(&self) -> Vec<CatalogProduct> {
        self.products.clone()
    }
}
