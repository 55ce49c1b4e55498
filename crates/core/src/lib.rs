//! Storefront Cart Core - Shared types library.
//!
//! This crate provides common types used across all Storefront Cart components:
//! - `storefront-cart` - Catalog, persistent store and cart manager
//! - `storefront-cart-cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
