//! Application state shared across cart surfaces.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rabbit_cart_core::ProductId;
use tokio::sync::OnceCell;

use crate::cart::{CartStore, HydrationGate, NewCartItem, ReadySignal, hydration_gate};
use crate::catalog::{CatalogProvider, StaticCatalog};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::storage::{FileBackend, PersistenceBackend};
use crate::view::{CartView, badge_count};

/// Application state shared across all cart surfaces.
///
/// This struct is cheaply cloneable via `Arc`. It is built once by the
/// composition root and handed to every consumer; there is no global cart.
/// The cart hydrates lazily on first access through [`AppState::cart`].
#[derive(Clone)]
pub struct AppState<B> {
    inner: Arc<AppStateInner<B>>,
}

struct AppStateInner<B> {
    config: StorefrontConfig,
    catalog: StaticCatalog,
    backend: B,
    gate: Mutex<Option<HydrationGate>>,
    ready: ReadySignal,
    cart: OnceCell<Mutex<CartStore<B>>>,
}

impl AppState<FileBackend> {
    /// Build state backed by files under the configured storage directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if a configured catalog cannot be loaded.
    pub async fn from_config(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => StaticCatalog::load(path).await?,
            None => StaticCatalog::default(),
        };
        let backend = FileBackend::new(&config.storage_dir);
        Ok(Self::new(config, catalog, backend))
    }
}

impl<B: PersistenceBackend + Clone> AppState<B> {
    /// Create a new application state. The cart is not read yet.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: StaticCatalog, backend: B) -> Self {
        let (gate, ready) = hydration_gate();
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                backend,
                gate: Mutex::new(Some(gate)),
                ready,
                cart: OnceCell::new(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &StaticCatalog {
        &self.inner.catalog
    }

    /// Readiness signal for cart-dependent rendering.
    #[must_use]
    pub fn ready(&self) -> ReadySignal {
        self.inner.ready.clone()
    }

    /// Lock the cart store, hydrating it on first access.
    ///
    /// The readiness signal flips once the store exists. A first call that
    /// is cancelled mid-hydration leaves the gate closed for the next caller.
    pub async fn cart(&self) -> MutexGuard<'_, CartStore<B>> {
        let store = self
            .inner
            .cart
            .get_or_init(|| async {
                let store =
                    CartStore::open(self.inner.backend.clone(), &self.inner.config.storage_key)
                        .await;
                Mutex::new(store)
            })
            .await;
        let gate = self
            .inner
            .gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(gate) = gate {
            gate.open();
        }
        store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown product, `AppError::Item`
    /// for a product that cannot be added, and `AppError::Cart` when the
    /// item was added but not persisted.
    pub async fn add_product(&self, product_id: &ProductId) -> Result<()> {
        let product = self
            .inner
            .catalog
            .product(product_id)
            .ok_or_else(|| AppError::NotFound(product_id.clone()))?;
        let item = NewCartItem::from_product(&product)?;
        self.cart().await.add_item(item)?;
        Ok(())
    }

    /// The cart page view, or `None` before hydration.
    #[must_use]
    pub fn view(&self) -> Option<CartView> {
        let store = self.inner.cart.get()?;
        let store = store.lock().unwrap_or_else(PoisonError::into_inner);
        CartView::gated(&self.inner.ready, store.cart(), self.inner.config.currency)
    }

    /// The header badge count, or `None` before hydration or when empty.
    #[must_use]
    pub fn badge(&self) -> Option<u64> {
        let store = self.inner.cart.get()?;
        let store = store.lock().unwrap_or_else(PoisonError::into_inner);
        badge_count(&self.inner.ready, store.cart())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::storage::{MemoryBackend, StorageError};

    /// Memory backend whose first read stalls, like a slow disk on startup.
    #[derive(Clone, Default)]
    struct StallingBackend {
        inner: MemoryBackend,
        loads: Arc<AtomicUsize>,
    }

    impl PersistenceBackend for StallingBackend {
        async fn load(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, StorageError> {
            if self.loads.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            self.inner.load(key).await
        }

        fn save(&self, key: &str, bytes: &[u8]) -> std::result::Result<(), StorageError> {
            self.inner.save(key, bytes)
        }
    }

    const CATALOG: &str = r#"[
        {"id": "p1", "name": "Rabbit Mug", "price": 1200, "stock": 5},
        {"id": "p2", "name": "Carrot Sticker", "price": 300, "stock": 0}
    ]"#;

    fn state(backend: MemoryBackend) -> AppState<MemoryBackend> {
        AppState::new(
            StorefrontConfig::default(),
            StaticCatalog::from_json(CATALOG).unwrap(),
            backend,
        )
    }

    #[tokio::test]
    async fn test_views_hidden_until_first_access() {
        let backend = MemoryBackend::new();
        backend.insert(
            "cart-storage",
            r#"{"state":{"items":[{"id":"p1","name":"Rabbit Mug","price":"1200","quantity":1}]},"version":0}"#,
        );

        let state = state(backend);
        assert!(!state.ready().is_ready());
        assert!(state.view().is_none());
        assert!(state.badge().is_none());

        drop(state.cart().await);
        assert!(state.ready().is_ready());
        assert_eq!(state.view().unwrap().subtotal, "¥1,200");
        assert_eq!(state.badge(), Some(1));
    }

    #[tokio::test]
    async fn test_add_product_snapshots_catalog_record() {
        let state = state(MemoryBackend::new());
        let id = ProductId::new("p1");

        state.add_product(&id).await.unwrap();
        state.add_product(&id).await.unwrap();

        let view = state.view().unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.subtotal, "¥2,400");
        assert_eq!(state.badge(), Some(2));
    }

    #[tokio::test]
    async fn test_add_product_rejects_unknown_and_sold_out() {
        let state = state(MemoryBackend::new());

        let err = state.add_product(&ProductId::new("p9")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = state.add_product(&ProductId::new("p2")).await.unwrap_err();
        assert!(matches!(err, AppError::Item(_)));

        assert!(state.cart().await.items().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_one_cart() {
        let state = state(MemoryBackend::new());
        let other = state.clone();

        state.add_product(&ProductId::new("p1")).await.unwrap();
        assert_eq!(other.cart().await.item_count(), 1);
        assert_eq!(other.badge(), Some(1));
    }

    #[tokio::test]
    async fn test_cancelled_hydration_still_flips_ready() {
        let backend = StallingBackend::default();
        backend.inner.insert(
            "cart-storage",
            r#"{"state":{"items":[{"id":"p1","name":"Rabbit Mug","price":"1200","quantity":2}]},"version":0}"#,
        );
        let state = AppState::new(
            StorefrontConfig::default(),
            StaticCatalog::from_json(CATALOG).unwrap(),
            backend,
        );

        let first = tokio::time::timeout(Duration::from_millis(20), state.cart()).await;
        assert!(first.is_err());
        assert!(!state.ready().is_ready());

        drop(state.cart().await);
        assert!(state.ready().is_ready());
        assert_eq!(state.view().unwrap().subtotal, "¥2,400");
        assert_eq!(state.badge(), Some(2));
    }
}
