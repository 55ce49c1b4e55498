//! Cart display data for renderers.

use rust_decimal::Decimal;
use serde::Serialize;

use storefront_cart_core::{CurrencyCode, LineItem, Price, ProductId};

/// Cart item display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub icon: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    fn from_item(item: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id,
            title: item.name.clone(),
            icon: item.icon.clone(),
            quantity: item.quantity,
            price: Price::new(item.price, currency).display_compact(),
            line_price: Price::new(item.line_total().unwrap_or(Decimal::MAX), currency)
                .display(),
        }
    }

    /// Unit price and quantity, e.g. "$899 x 2".
    #[must_use]
    pub fn price_line(&self) -> String {
        format!("{} x {}", self.price, self.quantity)
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
    /// Show the "your cart is empty" indicator.
    pub is_empty: bool,
    /// Whether the checkout button is enabled.
    pub checkout_enabled: bool,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::zero(currency).display(),
            item_count: 0,
            is_empty: true,
            checkout_enabled: false,
        }
    }

    pub(crate) fn new(items: &[LineItem], item_count: u64, subtotal: Price) -> Self {
        if items.is_empty() {
            return Self::empty(subtotal.currency_code);
        }

        Self {
            items: items
                .iter()
                .map(|item| CartItemView::from_item(item, subtotal.currency_code))
                .collect(),
            subtotal: subtotal.display(),
            item_count,
            is_empty: false,
            checkout_enabled: true,
        }
    }
}
