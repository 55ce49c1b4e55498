//! Cart events for rendering layers.
//!
//! The cart never draws anything itself. Renderers register a
//! [`CartListener`] and redraw from the [`CartSummary`] they receive after
//! each mutation; successful adds also produce a [`Notification`].

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::cart::CartSummary;

/// A transient, user-facing message (e.g., "iPhone 14 Pro added to cart!").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    /// When the notification was raised.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// How long a notification stays on screen.
    pub const DISPLAY_SECONDS: i64 = 3;

    /// Create a notification raised now.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    /// Notification for a product that was just added.
    #[must_use]
    pub fn added_to_cart(product_name: &str) -> Self {
        Self::new(format!("{product_name} added to cart!"))
    }

    /// When a renderer should take the notification down.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(Self::DISPLAY_SECONDS)
    }

    /// Whether the notification should no longer be shown at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Subscriber to cart events.
///
/// Both methods default to no-ops so listeners only implement what they
/// render. Listeners are called synchronously after the cart has persisted.
pub trait CartListener {
    /// A user-facing notification was raised.
    fn on_notification(&self, _notification: &Notification) {}

    /// The cart contents changed.
    fn on_cart_changed(&self, _summary: &CartSummary) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_to_cart_message() {
        let n = Notification::added_to_cart("Dyson V11 Vacuum");
        assert_eq!(n.message, "Dyson V11 Vacuum added to cart!");
    }

    #[test]
    fn test_expiry() {
        let n = Notification::new("hello");
        assert!(!n.is_expired(n.created_at));
        assert!(!n.is_expired(n.created_at + Duration::milliseconds(2999)));
        assert!(n.is_expired(n.created_at + Duration::seconds(3)));
    }
}
