//! Cart display.

use rabbit_cart_storefront::error::{AppError, Result};
use rabbit_cart_storefront::state::AppState;
use rabbit_cart_storefront::storage::PersistenceBackend;

/// Print the cart page.
///
/// Hydrates the cart first; a surface that has not hydrated renders nothing.
pub async fn show<B: PersistenceBackend + Clone>(state: &AppState<B>) {
    drop(state.cart().await);

    let Some(view) = state.view() else {
        return;
    };

    if view.is_empty() {
        tracing::info!("Your cart is empty");
        return;
    }

    for item in &view.items {
        tracing::info!(
            "  {} x{}  {} each  {}",
            item.name,
            item.quantity,
            item.price,
            item.line_price
        );
        tracing::debug!("    id: {}", item.id);
    }
    tracing::info!("Items: {}  Total: {}", view.item_count, view.subtotal);
}

/// Print the cart after a mutation, then hand back its outcome.
///
/// The cart is shown whenever the change reached memory, saved or not.
///
/// # Errors
///
/// Returns `outcome` unchanged.
pub async fn show_after<B: PersistenceBackend + Clone>(
    state: &AppState<B>,
    outcome: Result<()>,
) -> Result<()> {
    if changed_cart(&outcome) {
        show(state).await;
    }
    outcome
}

/// Whether a mutation outcome left the in-memory cart updated.
pub fn changed_cart(outcome: &Result<()>) -> bool {
    outcome.as_ref().map_or_else(AppError::mutation_applied, |()| true)
}
