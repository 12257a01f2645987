//! Cart store: the pure cart plus its durable mirror.
//!
//! A [`CartStore`] only exists after hydration, so no mutation can race the
//! initial read. Every mutation applies to the in-memory [`Cart`] first and
//! then writes the full snapshot. A failed write is returned to the caller
//! but never rolls back the in-memory change.

use rabbit_cart_core::ProductId;
use rust_decimal::Decimal;
use tracing::instrument;

use super::error::CartError;
use super::gate::{HydrationGate, ReadySignal, hydration_gate};
use super::snapshot;
use super::state::{Cart, CartLine, NewCartItem};
use crate::storage::PersistenceBackend;

/// The cart for one running application, mirrored to a persistence backend.
#[derive(Debug)]
pub struct CartStore<B> {
    cart: Cart,
    backend: B,
    key: String,
    ready: ReadySignal,
}

impl<B: PersistenceBackend> CartStore<B> {
    /// Read the persisted cart and open `gate`.
    ///
    /// A missing, unreadable or corrupt snapshot yields an empty cart; the
    /// gate opens in every case.
    #[instrument(skip_all, fields(key = %key.as_ref()))]
    pub async fn hydrate(backend: B, key: impl AsRef<str>, gate: HydrationGate) -> Self {
        let key = key.as_ref().to_owned();

        let cart = match backend.load(&key).await {
            Ok(Some(bytes)) => snapshot::decode(&bytes).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding corrupt cart snapshot");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart snapshot, starting empty");
                Cart::new()
            }
        };

        tracing::info!(lines = cart.len(), items = cart.item_count(), "Cart hydrated");

        let ready = gate.signal();
        gate.open();

        Self {
            cart,
            backend,
            key,
            ready,
        }
    }

    /// Hydrate with a private gate, for callers with no early observers.
    pub async fn open(backend: B, key: impl AsRef<str>) -> Self {
        let (gate, _signal) = hydration_gate();
        Self::hydrate(backend, key, gate).await
    }

    /// Add one unit of `item`.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot could not be persisted. The item
    /// is in the cart regardless.
    pub fn add_item(&mut self, item: NewCartItem) -> Result<(), CartError> {
        let product_id = item.product_id().clone();
        let quantity = self.cart.add_item(item);
        tracing::debug!(product_id = %product_id, quantity, "Added item to cart");
        self.persist()
    }

    /// Remove the line for `product_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot could not be persisted.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), CartError> {
        let removed = self.cart.remove_item(product_id);
        tracing::debug!(product_id = %product_id, removed, "Removed item from cart");
        self.persist()
    }

    /// Set the quantity for `product_id`; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot could not be persisted.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        let changed = self.cart.update_quantity(product_id, quantity);
        tracing::debug!(product_id = %product_id, quantity, changed, "Updated cart quantity");
        self.persist()
    }

    /// Add one to the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot could not be persisted.
    pub fn increment(&mut self, product_id: &ProductId) -> Result<(), CartError> {
        let quantity = self.quantity_of(product_id);
        self.update_quantity(product_id, quantity + 1)
    }

    /// Subtract one from the quantity of an existing line, removing it at zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the snapshot could not be persisted.
    pub fn decrement(&mut self, product_id: &ProductId) -> Result<(), CartError> {
        let quantity = self.quantity_of(product_id);
        self.update_quantity(product_id, quantity - 1)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the empty snapshot could not be persisted.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.cart.clear();
        tracing::debug!("Cleared cart");
        self.persist()
    }

    /// Write the current cart to the backend.
    ///
    /// # Errors
    ///
    /// Returns `CartError::PersistenceWrite` if the backend rejects the write.
    pub fn persist(&self) -> Result<(), CartError> {
        let bytes = snapshot::encode(&self.cart)?;
        self.backend.save(&self.key, &bytes).map_err(|source| {
            tracing::warn!(key = %self.key, error = %source, "Cart snapshot not persisted");
            CartError::PersistenceWrite {
                key: self.key.clone(),
                source,
            }
        })
    }
}

impl<B> CartStore<B> {
    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.cart.total_amount()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        self.cart.items()
    }

    /// The underlying cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Readiness signal; always ready once a store exists.
    #[must_use]
    pub fn ready(&self) -> ReadySignal {
        self.ready.clone()
    }

    /// Storage key the cart is mirrored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The persistence backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.cart
            .get(product_id)
            .map_or(0, |line| i64::from(line.quantity()))
    }
}
