//! Unified error handling.
//!
//! Provides a unified `AppError` type for front ends that drive the store.
//! Persistence write failures stay distinguishable so callers can report
//! them without treating the operation as failed.

use rabbit_cart_core::ProductId;
use thiserror::Error;

use crate::cart::{CartError, ItemError};
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation applied but not persisted.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Item rejected before reaching the cart.
    #[error("Invalid item: {0}")]
    Item(#[from] ItemError),

    /// Product is not in the catalog.
    #[error("Not found: {0}")]
    NotFound(ProductId),
}

impl AppError {
    /// Whether the requested cart mutation took effect in memory.
    ///
    /// True for cart errors: only the durable mirror is stale, and the next
    /// successful write resynchronizes it.
    #[must_use]
    pub const fn mutation_applied(&self) -> bool {
        matches!(self, Self::Cart(_))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
