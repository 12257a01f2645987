//! Client-side cart state manager.
//!
//! # Modules
//!
//! - [`state`] - pure transitions over ordered cart lines
//! - [`snapshot`] - the persisted JSON envelope
//! - [`gate`] - hydration readiness signal
//! - [`store`] - hydration plus the write-through persistence mirror

pub mod error;
pub mod gate;
pub mod snapshot;
pub mod state;
pub mod store;

pub use error::{CartError, ItemError, SnapshotError};
pub use gate::{HydrationGate, ReadySignal, hydration_gate};
pub use state::{Cart, CartLine, NewCartItem};
pub use store::CartStore;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";
