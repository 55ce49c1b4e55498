//! Persisted cart format.
//!
//! The stored value is a JSON array of line items. Stored data is treated
//! as untrusted: anything that is not an array yields an empty cart, and
//! each entry is checked on its own so one bad entry does not cost the
//! whole cart.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

use storefront_cart_core::LineItem;

/// Serialize line items for storage.
pub(crate) fn encode(items: &[LineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decode a stored cart, dropping anything that fails validation.
///
/// - non-JSON or non-array values give an empty cart
/// - entries missing fields, with `quantity < 1`, a negative price or a
///   blank name are skipped
/// - entries repeating an earlier id are folded into the first one
/// - entries that would push the cart total past what a [`Decimal`] holds
///   are skipped, so the total of a decoded cart always fits
pub(crate) fn decode(raw: &str) -> Vec<LineItem> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            warn!(kind = value_kind(&other), "Stored cart is not a list, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Stored cart is not valid JSON, starting empty");
            return Vec::new();
        }
    };

    let mut items: Vec<LineItem> = Vec::with_capacity(entries.len());
    let mut total = Decimal::ZERO;
    for (index, entry) in entries.into_iter().enumerate() {
        let item = match serde_json::from_value::<LineItem>(entry) {
            Ok(item) => item,
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed cart entry");
                continue;
            }
        };

        if let Err(reason) = validate(&item) {
            warn!(index, id = %item.id, reason, "Skipping invalid cart entry");
            continue;
        }

        // A merged duplicate is priced at the first entry's unit price.
        let existing = items.iter_mut().find(|i| i.id == item.id);
        let (unit_price, added) = existing.as_ref().map_or((item.price, item.quantity), |existing| {
            (existing.price, item.quantity.min(u32::MAX - existing.quantity))
        });
        let Some(next_total) = unit_price
            .checked_mul(Decimal::from(added))
            .and_then(|amount| total.checked_add(amount))
        else {
            warn!(index, id = %item.id, "Skipping cart entry that overflows the cart total");
            continue;
        };
        total = next_total;

        if let Some(existing) = existing {
            warn!(index, id = %item.id, "Merging duplicate cart entry");
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            items.push(item);
        }
    }
    items
}

fn validate(item: &LineItem) -> Result<(), &'static str> {
    if item.quantity == 0 {
        return Err("quantity must be at least 1");
    }
    if item.price < Decimal::ZERO {
        return Err("price cannot be negative");
    }
    if item.name.trim().is_empty() {
        return Err("name cannot be empty");
    }
    Ok(())
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
