//! Catalog listing.

use rabbit_cart_storefront::catalog::CatalogProvider;
use rabbit_cart_storefront::error::Result;
use rabbit_cart_storefront::state::AppState;
use rabbit_cart_storefront::storage::PersistenceBackend;
use rabbit_cart_storefront::view::format_price;

/// List every catalog product with price and stock.
///
/// # Errors
///
/// Returns `AppError::Config` if no catalog file is configured.
pub fn list<B: PersistenceBackend + Clone>(state: &AppState<B>) -> Result<()> {
    let path = state.config().require_catalog_path()?;
    let currency = state.config().currency;
    let products = state.catalog().products();

    tracing::info!("Catalog {} ({} products)", path.display(), products.len());
    for product in &products {
        let availability = if product.is_in_stock() {
            format!("{} in stock", product.stock)
        } else {
            "sold out".to_owned()
        };
        tracing::info!(
            "  {}  {}  {}  [{}]",
            product.id,
            product.name,
            format_price(product.price, currency),
            availability
        );
    }
    Ok(())
}
