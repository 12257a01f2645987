//! rabbit-cart Core - Shared types library.
//!
//! This crate provides common types used across all rabbit-cart components:
//! - `storefront` - Cart state manager, persistence, catalog and views
//! - `cli` - Command-line front end that owns the application state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
