//! Catalog product type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A purchasable product as listed in the catalog.
///
/// Products are immutable once the catalog is built. The cart copies
/// `name`, `price` and `icon` into a [`LineItem`](super::LineItem) at add
/// time; the presentation fields (`description`, `category`, `badge`) stay
/// in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short marketing blurb shown on the product card.
    #[serde(default)]
    pub description: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Grouping used by the storefront (e.g., "smartphones").
    #[serde(default)]
    pub category: String,
    /// Optional ribbon text (e.g., "New", "Sale").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    /// Icon class rendered in place of a product image.
    #[serde(default)]
    pub icon: String,
}
