//! rabbit-cart Storefront library.
//!
//! This crate provides the cart state manager and its collaborators as a
//! library, allowing it to be tested and reused by any front end.
//!
//! # Layers
//!
//! - [`cart::state`] - pure cart transitions (no I/O)
//! - [`cart::store`] - hydration and the persistence mirror
//! - [`storage`] - persistence backends
//! - [`view`] - display data gated on hydration
//! - [`state`] - application state owned by the composition root

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod view;
