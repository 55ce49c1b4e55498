//! Storefront Cart library.
//!
//! A shopping cart kept in a durable key-value store, backed by a static
//! product catalog.
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only product list and the [`ProductLookup`] seam
//! - [`store`] - [`KeyValueStore`] trait with in-memory and file backends
//! - [`cart`] - [`CartManager`], its persisted format and display view
//! - [`events`] - Notifications and the [`CartListener`] seam for renderers
//! - [`config`] - Environment-driven configuration
//!
//! Everything is synchronous and single-threaded: a command runs to
//! completion, persists, then notifies listeners before returning.
//!
//! # Example
//!
//! ```rust
//! use storefront_cart::{CartManager, Catalog, MemoryStore, ProductId};
//!
//! let store = MemoryStore::new();
//! let mut cart = CartManager::open(store, Catalog::builtin());
//!
//! cart.add_item(ProductId::new(1))?;
//! cart.add_item(ProductId::new(4))?;
//!
//! assert_eq!(cart.total_item_count(), 2);
//! assert_eq!(cart.total_price().to_string(), "$1228.00");
//! # Ok::<(), storefront_cart::CartError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod events;
pub mod store;

pub use cart::{
    AddOutcome, CartError, CartItemView, CartManager, CartState, CartSummary, CartView,
    CheckoutReceipt, DEFAULT_STORAGE_KEY,
};
pub use catalog::{Catalog, CatalogError, ProductLookup};
pub use config::{CartConfig, ConfigError, LogFormat};
pub use events::{CartListener, Notification};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

pub use storefront_cart_core::{CurrencyCode, LineItem, Price, Product, ProductId};
