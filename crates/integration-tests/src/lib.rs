//! Integration tests for Storefront Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Carts surviving across instances and store backends
//! - `cart_properties` - Generated add/remove sequences checked against a model
//!
//! This library only holds shared fixtures.

use rust_decimal::Decimal;
use storefront_cart::{Catalog, Product, ProductId};

/// A small catalog with fractional prices, for rounding checks.
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn fractional_catalog() -> Catalog {
    let product = |id: i32, name: &str, cents: i64| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: String::new(),
        price: Decimal::new(cents, 2),
        category: "accessories".to_string(),
        badge: None,
        icon: "fas fa-plug".to_string(),
    };

    Catalog::new(vec![
        product(101, "USB-C Cable", 999),
        product(102, "Screen Protector", 1_249),
        product(103, "Sticker", 5),
    ])
    .unwrap()
}

/// A cart exactly as the browser page writes it to local storage.
pub const BROWSER_CART_JSON: &str = r#"[{"id":1,"name":"Samsung Galaxy S23","price":899,"quantity":2,"icon":"fas fa-mobile-alt"},{"id":4,"name":"Bose QuietComfort 45","price":329,"quantity":1,"icon":"fas fa-headphones"}]"#;
