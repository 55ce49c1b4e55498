//! Cart line item type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// A cart entry: a denormalized copy of product fields plus a quantity.
///
/// The copy is taken when the product is first added and is never
/// re-synced with the catalog afterwards.
///
/// ## Invariants
///
/// - `quantity >= 1` (an entry is removed rather than dropped to zero)
/// - at most one entry per `id` within a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product this entry refers to.
    pub id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    ///
    /// Stored as a decimal string (`"899"`) so the value survives a round
    /// trip exactly. Plain JSON numbers are accepted when reading.
    pub price: Decimal,
    /// Number of units, always at least one.
    pub quantity: u32,
    /// Product icon at add time.
    pub icon: String,
}

impl LineItem {
    /// Create a single-unit entry from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            icon: product.icon.clone(),
        }
    }

    /// Unit price multiplied by quantity, or `None` if the product does not
    /// fit in a [`Decimal`].
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Sum of line totals, or `None` on overflow.
    #[must_use]
    pub fn checked_total(items: &[Self]) -> Option<Decimal> {
        items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()?))
    }

    /// Add one unit, saturating at `u32::MAX`. Returns the new quantity.
    pub const fn increment(&mut self) -> u32 {
        self.quantity = self.quantity.saturating_add(1);
        self.quantity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        Product {
            id: ProductId::new(4),
            name: "Bose QuietComfort 45".to_string(),
            description: "Noise cancelling headphones with premium sound".to_string(),
            price: Decimal::new(329, 0),
            category: "audio".to_string(),
            badge: Some("Popular".to_string()),
            icon: "fas fa-headphones".to_string(),
        }
    }

    #[test]
    fn test_from_product_copies_cart_fields() {
        let item = LineItem::from_product(&headphones());
        assert_eq!(item.id, ProductId::new(4));
        assert_eq!(item.name, "Bose QuietComfort 45");
        assert_eq!(item.price, Decimal::new(329, 0));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.icon, "fas fa-headphones");
    }

    #[test]
    fn test_line_total() {
        let mut item = LineItem::from_product(&headphones());
        item.increment();
        item.increment();
        assert_eq!(item.line_total(), Some(Decimal::new(987, 0)));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let mut item = LineItem::from_product(&headphones());
        item.price = Decimal::from_str_exact("100000000000000000000").unwrap();
        item.quantity = u32::MAX;
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_checked_total() {
        let mut phone = LineItem::from_product(&headphones());
        phone.price = Decimal::new(899, 0);
        phone.quantity = 2;
        let headphones = LineItem::from_product(&headphones());
        assert_eq!(
            LineItem::checked_total(&[phone, headphones.clone()]),
            Some(Decimal::new(2127, 0))
        );
        assert_eq!(LineItem::checked_total(&[]), Some(Decimal::ZERO));

        let mut huge = headphones;
        huge.price = Decimal::MAX;
        assert_eq!(LineItem::checked_total(&[huge.clone(), huge]), None);
    }

    #[test]
    fn test_increment_saturates() {
        let mut item = LineItem::from_product(&headphones());
        item.quantity = u32::MAX;
        assert_eq!(item.increment(), u32::MAX);
    }

    #[test]
    fn test_serialized_shape() {
        let item = LineItem::from_product(&headphones());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["name"], "Bose QuietComfort 45");
        assert_eq!(value["quantity"], 1);
        assert_eq!(value["icon"], "fas fa-headphones");
        assert_eq!(value["price"], "329");
    }

    #[test]
    fn test_numeric_price_accepted() {
        let json = r#"{"id":1,"name":"Samsung Galaxy S23","price":899,"quantity":2,"icon":"fas fa-mobile-alt"}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::new(899, 0));
        assert_eq!(item.quantity, 2);
    }
}
