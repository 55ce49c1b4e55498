//! Core types for Storefront Cart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod product;

pub use id::ProductId;
pub use line_item::LineItem;
pub use price::{CurrencyCode, ParseCurrencyError, Price};
pub use product::Product;
