//! Integration tests for rabbit-cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rabbit-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_sessions` - file-backed persistence across simulated restarts
//! - `app_state` - lazy hydration and catalog-driven adds through `AppState`
//!
//! Each test gets its own scratch directory from [`scratch_dir`].

use tempfile::TempDir;

/// Create a fresh directory under the system temp dir, removed on drop.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn scratch_dir() -> std::io::Result<TempDir> {
    tempfile::Builder::new().prefix("rabbit-cart-").tempdir()
}
