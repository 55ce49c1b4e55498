//! Checkout receipt.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use storefront_cart_core::{LineItem, Price};

/// Record of a completed checkout.
///
/// Payment is out of scope; the receipt is what a payment step would be
/// handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    /// Reference for this order.
    pub order_ref: Uuid,
    /// When checkout happened.
    pub placed_at: DateTime<Utc>,
    /// Line items as they were at checkout.
    pub items: Vec<LineItem>,
    /// Total number of units.
    pub item_count: u64,
    /// Order total, rounded for display.
    pub total: Price,
}

impl CheckoutReceipt {
    pub(crate) fn new(items: Vec<LineItem>, item_count: u64, total: Price) -> Self {
        Self {
            order_ref: Uuid::new_v4(),
            placed_at: Utc::now(),
            items,
            item_count,
            total,
        }
    }
}
