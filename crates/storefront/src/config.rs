//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RABBIT_CART_STORAGE_DIR` - Directory for persisted cart files (default: .rabbit-cart)
//! - `RABBIT_CART_STORAGE_KEY` - Key the cart snapshot is stored under (default: cart-storage)
//! - `RABBIT_CART_CATALOG_PATH` - JSON catalog file
//! - `RABBIT_CART_CURRENCY` - Display currency, ISO 4217 (default: JPY)

use std::path::PathBuf;

use rabbit_cart_core::CurrencyCode;
use thiserror::Error;

use crate::cart::DEFAULT_STORAGE_KEY;

const DEFAULT_STORAGE_DIR: &str = ".rabbit-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart
    pub storage_dir: PathBuf,
    /// Key the cart snapshot is stored under
    pub storage_key: String,
    /// JSON catalog file, if any
    pub catalog_path: Option<PathBuf>,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            catalog_path: None,
            currency: CurrencyCode::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("RABBIT_CART_STORAGE_DIR")
            .map_or(defaults.storage_dir, PathBuf::from);

        let storage_key = lookup("RABBIT_CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        validate_storage_key(&storage_key)?;

        let catalog_path = lookup("RABBIT_CART_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let currency = match lookup("RABBIT_CART_CURRENCY") {
            Some(code) => code.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("RABBIT_CART_CURRENCY".to_string(), e.to_string())
            })?,
            None => defaults.currency,
        };

        Ok(Self {
            storage_dir,
            storage_key,
            catalog_path,
            currency,
        })
    }

    /// The catalog path, or an error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when no catalog is configured.
    pub fn require_catalog_path(&self) -> Result<&PathBuf, ConfigError> {
        self.catalog_path
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("RABBIT_CART_CATALOG_PATH".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Storage keys become file names, so keep them to a safe alphabet.
fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "RABBIT_CART_STORAGE_KEY".to_string(),
            format!("{key:?} must be non-empty and use only [A-Za-z0-9._-]"),
        ))
    }
}
