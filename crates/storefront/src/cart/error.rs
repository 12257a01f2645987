//! Cart error types.

use rabbit_cart_core::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors reported by [`CartStore`](super::CartStore) mutations.
///
/// None of these undo the in-memory mutation: the store stays authoritative
/// for the session and the next successful write resynchronizes storage.
#[derive(Debug, Error)]
pub enum CartError {
    /// The snapshot could not be written to the persistence backend.
    #[error("failed to persist cart under {key:?}: {source}")]
    PersistenceWrite {
        /// Storage key the write targeted.
        key: String,
        /// Backend failure.
        #[source]
        source: StorageError,
    },

    /// The snapshot could not be serialized.
    #[error("failed to encode cart snapshot: {0}")]
    Encode(#[from] SnapshotError),
}

/// Errors decoding or encoding a persisted snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Malformed JSON or a record of the wrong shape.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Written by an incompatible version of the store.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the envelope.
        found: u32,
        /// Version this build reads and writes.
        expected: u32,
    },
}

/// Errors validating an item before it reaches the cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemError {
    /// The product id is empty or blank.
    #[error("product id cannot be empty")]
    EmptyProductId,

    /// The unit price is below zero.
    #[error("price must not be negative (got {0})")]
    NegativePrice(Decimal),

    /// The product has no stock left.
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
}
