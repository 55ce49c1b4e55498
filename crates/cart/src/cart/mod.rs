//! Cart manager.
//!
//! [`CartManager`] owns the working copy of the cart: an ordered list of
//! [`LineItem`]s, unique by product id. The store holds the durable copy
//! under a single key and is rewritten after every mutation.
//!
//! # Lifecycle
//!
//! 1. [`CartManager::open`] (or `new` + [`CartManager::load`]) reads the
//!    stored cart; missing or malformed data gives an empty cart.
//! 2. Commands ([`add_item`](CartManager::add_item),
//!    [`remove_item`](CartManager::remove_item), [`clear`](CartManager::clear),
//!    [`checkout`](CartManager::checkout)) mutate, persist, then notify
//!    listeners.
//! 3. Read accessors ([`items`](CartManager::items),
//!    [`total_item_count`](CartManager::total_item_count),
//!    [`total_price`](CartManager::total_price), [`view`](CartManager::view))
//!    are pure.

mod checkout;
mod persistence;
mod view;

pub use checkout::CheckoutReceipt;
pub use view::{CartItemView, CartView};

use core::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use storefront_cart_core::{CurrencyCode, LineItem, Price, ProductId};

use crate::catalog::ProductLookup;
use crate::events::{CartListener, Notification};
use crate::store::{KeyValueStore, StoreError};

/// Store key the cart is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Errors returned by cart commands.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart could not be persisted.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The change would push the cart total past the largest representable
    /// amount. The cart is left as it was.
    #[error("Cart total is too large")]
    TotalOverflow,

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty. Add some products first.")]
    EmptyCart,
}

/// What [`CartManager::add_item`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Added,
    /// An existing line item was bumped to `quantity`.
    Incremented { quantity: u32 },
    /// The id is not in the catalog; nothing changed.
    UnknownProduct,
}

/// The two states checkout and display logic branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    Empty,
    NonEmpty,
}

impl CartState {
    /// Checkout is only offered for a non-empty cart.
    #[must_use]
    pub const fn checkout_enabled(self) -> bool {
        matches!(self, Self::NonEmpty)
    }
}

/// Derived totals handed to listeners after every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub item_count: u64,
    pub total: Price,
    pub state: CartState,
}

/// A shopping cart persisted in a [`KeyValueStore`] and priced from a
/// [`ProductLookup`].
///
/// The sum of line totals always fits in a [`Decimal`]: loading drops
/// entries that would overflow it and [`add_item`](Self::add_item) refuses
/// to grow past it.
pub struct CartManager<S, C> {
    store: S,
    catalog: C,
    storage_key: String,
    currency: CurrencyCode,
    items: Vec<LineItem>,
    listeners: Vec<Box<dyn CartListener>>,
}

impl<S, C> fmt::Debug for CartManager<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("storage_key", &self.storage_key)
            .field("currency", &self.currency)
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore, C: ProductLookup> CartManager<S, C> {
    /// Create an empty cart without reading the store.
    ///
    /// Call [`load`](Self::load) to pick up a previously saved cart.
    #[must_use]
    pub fn new(store: S, catalog: C) -> Self {
        Self {
            store,
            catalog,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
            items: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Create a cart and load whatever the store holds under the default key.
    #[must_use]
    pub fn open(store: S, catalog: C) -> Self {
        let mut cart = Self::new(store, catalog);
        cart.load();
        cart
    }

    /// Persist under `key` instead of [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Price totals in `currency`.
    #[must_use]
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// Register a listener for notifications and cart changes.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the working copy with the stored cart.
    ///
    /// Never fails: an unreadable store, a missing key or malformed data
    /// all give an empty cart.
    #[instrument(skip(self), fields(key = %self.storage_key))]
    pub fn load(&mut self) {
        self.items = match self.store.get(&self.storage_key) {
            Ok(Some(raw)) => persistence::decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                Vec::new()
            }
        };
        debug!(items = self.items.len(), "Cart loaded");
    }

    /// Write the working copy to the store.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart cannot be encoded or the store
    /// rejects the write.
    pub fn save(&self) -> Result<(), CartError> {
        let encoded = persistence::encode(&self.items)?;
        self.store.set(&self.storage_key, &encoded)?;
        Ok(())
    }

    /// Add one unit of a catalog product.
    ///
    /// Unknown ids are a silent no-op returning [`AddOutcome::UnknownProduct`].
    /// Otherwise the cart is persisted, listeners get an "added to cart"
    /// notification and a fresh summary.
    ///
    /// # Errors
    ///
    /// Returns `CartError::TotalOverflow` (changing nothing) if one more unit
    /// would overflow the cart total, or `CartError` if persisting fails. The
    /// in-memory cart keeps the change in the latter case.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, product_id: ProductId) -> Result<AddOutcome, CartError> {
        let Some(product) = self.catalog.find_by_id(product_id) else {
            debug!("Product not in catalog, ignoring");
            return Ok(AddOutcome::UnknownProduct);
        };

        // An existing entry grows at the unit price it was first added at.
        let unit_price = self.get(product_id).map_or(product.price, |item| item.price);
        if LineItem::checked_total(&self.items)
            .and_then(|total| total.checked_add(unit_price))
            .is_none()
        {
            warn!(price = %unit_price, "Adding product would overflow the cart total");
            return Err(CartError::TotalOverflow);
        }

        let notification = Notification::added_to_cart(&product.name);
        let outcome = if let Some(item) = self.items.iter_mut().find(|i| i.id == product_id) {
            AddOutcome::Incremented {
                quantity: item.increment(),
            }
        } else {
            self.items.push(LineItem::from_product(product));
            AddOutcome::Added
        };

        self.save()?;
        debug!(?outcome, "Item added");

        for listener in &self.listeners {
            listener.on_notification(&notification);
        }
        self.emit_changed();
        Ok(outcome)
    }

    /// Remove the line item for `product_id`, whatever its quantity.
    ///
    /// Returns whether an entry was removed. Removing an id that is not in
    /// the cart changes nothing and is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if persisting fails.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<bool, CartError> {
        let Some(position) = self.items.iter().position(|i| i.id == product_id) else {
            debug!("Product not in cart, nothing to remove");
            return Ok(false);
        };

        self.items.remove(position);
        self.save()?;
        self.emit_changed();
        Ok(true)
    }

    /// Empty the cart and persist the empty state.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if persisting fails.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.save()?;
        self.emit_changed();
        Ok(())
    }

    /// Check out: snapshot the cart into a receipt, then clear it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` (leaving storage untouched) if there is
    /// nothing to check out, or `CartError` if persisting the cleared cart
    /// fails.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, CartError> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let receipt = CheckoutReceipt::new(
            self.items.clone(),
            self.total_item_count(),
            self.total_price(),
        );
        self.clear()?;

        info!(
            order_ref = %receipt.order_ref,
            items = receipt.item_count,
            total = %receipt.total,
            "Checkout complete"
        );
        Ok(receipt)
    }

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line item for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Sum of quantities across all line items.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of `price * quantity`, rounded to two fractional digits.
    #[must_use]
    pub fn total_price(&self) -> Price {
        // Saturates, though the cart never holds items whose total overflows.
        let sum = LineItem::checked_total(&self.items).unwrap_or(Decimal::MAX);
        let exact = Price::new(sum, self.currency);
        Price::new(exact.rounded(), self.currency)
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empty or non-empty.
    #[must_use]
    pub fn state(&self) -> CartState {
        if self.items.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    /// Current totals and state.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.total_item_count(),
            total: self.total_price(),
            state: self.state(),
        }
    }

    /// Display data for renderers.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::new(&self.items, self.total_item_count(), self.total_price())
    }

    /// The product source this cart resolves ids against.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The store this cart persists to.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Key the cart is persisted under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn emit_changed(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let summary = self.summary();
        for listener in &self.listeners {
            listener.on_cart_changed(&summary);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::store::MemoryStore;

    fn open_cart(store: &MemoryStore) -> CartManager<MemoryStore, Catalog> {
        CartManager::open(store.clone(), Catalog::builtin())
    }

    #[derive(Default, Clone)]
    struct Recorder {
        messages: Rc<RefCell<Vec<String>>>,
        summaries: Rc<RefCell<Vec<CartSummary>>>,
    }

    impl CartListener for Recorder {
        fn on_notification(&self, notification: &Notification) {
            self.messages.borrow_mut().push(notification.message.clone());
        }

        fn on_cart_changed(&self, summary: &CartSummary) {
            self.summaries.borrow_mut().push(*summary);
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "readonly".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = open_cart(&MemoryStore::new());
        assert!(cart.is_empty());
        assert_eq!(cart.state(), CartState::Empty);
        assert!(!cart.state().checkout_enabled());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price().to_string(), "$0.00");
    }

    #[test]
    fn test_add_same_product_twice_merges() {
        let mut cart = open_cart(&MemoryStore::new());

        assert_eq!(cart.add_item(ProductId::new(1)).unwrap(), AddOutcome::Added);
        assert_eq!(
            cart.add_item(ProductId::new(1)).unwrap(),
            AddOutcome::Incremented { quantity: 2 }
        );

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_add_copies_product_fields() {
        let mut cart = open_cart(&MemoryStore::new());
        cart.add_item(ProductId::new(5)).unwrap();

        let item = cart.get(ProductId::new(5)).unwrap();
        assert_eq!(item.name, "iPhone 14 Pro");
        assert_eq!(item.price, Decimal::new(999, 0));
        assert_eq!(item.icon, "fas fa-mobile-alt");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        let recorder = Recorder::default();
        cart.subscribe(recorder.clone());

        assert_eq!(
            cart.add_item(ProductId::new(42)).unwrap(),
            AddOutcome::UnknownProduct
        );

        assert!(cart.is_empty());
        assert!(store.is_empty(), "nothing should be persisted");
        assert!(recorder.messages.borrow().is_empty());
        assert!(recorder.summaries.borrow().is_empty());
    }

    #[test]
    fn test_add_persists_and_notifies() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        let recorder = Recorder::default();
        cart.subscribe(recorder.clone());

        cart.add_item(ProductId::new(4)).unwrap();

        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_some());
        assert_eq!(
            *recorder.messages.borrow(),
            vec!["Bose QuietComfort 45 added to cart!".to_string()]
        );
        let summaries = recorder.summaries.borrow();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].item_count, 1);
        assert_eq!(summaries[0].state, CartState::NonEmpty);
    }

    #[test]
    fn test_remove_absent_product_leaves_cart_unchanged() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add_item(ProductId::new(2)).unwrap();
        let before = cart.items().to_vec();
        let stored_before = store.get(DEFAULT_STORAGE_KEY).unwrap();

        assert!(!cart.remove_item(ProductId::new(3)).unwrap());
        assert!(!cart.remove_item(ProductId::new(3)).unwrap());

        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), stored_before);
    }

    #[test]
    fn test_remove_deletes_whole_entry() {
        let mut cart = open_cart(&MemoryStore::new());
        cart.add_item(ProductId::new(1)).unwrap();
        cart.add_item(ProductId::new(1)).unwrap();
        cart.add_item(ProductId::new(1)).unwrap();

        assert!(cart.remove_item(ProductId::new(1)).unwrap());
        assert!(cart.get(ProductId::new(1)).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price_example() {
        let mut cart = open_cart(&MemoryStore::new());
        cart.add_item(ProductId::new(1)).unwrap();
        cart.add_item(ProductId::new(4)).unwrap();

        assert_eq!(cart.total_price().amount, Decimal::new(122_800, 2));
        assert_eq!(cart.total_price().to_string(), "$1228.00");
    }

    #[test]
    fn test_scenario_add_add_add_remove() {
        let mut cart = open_cart(&MemoryStore::new());
        cart.add_item(ProductId::new(1)).unwrap();
        cart.add_item(ProductId::new(1)).unwrap();
        cart.add_item(ProductId::new(4)).unwrap();
        cart.remove_item(ProductId::new(1)).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id, ProductId::new(4));
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[0].price, Decimal::new(329, 0));
        assert_eq!(cart.total_item_count(), 1);
        assert_eq!(cart.total_price().to_string(), "$329.00");
    }

    #[test]
    fn test_save_then_open_fresh_instance() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add_item(ProductId::new(6)).unwrap();
        cart.add_item(ProductId::new(2)).unwrap();
        cart.add_item(ProductId::new(6)).unwrap();

        let reopened = open_cart(&store);
        assert_eq!(reopened.items(), cart.items());
        assert_eq!(reopened.items()[0].id, ProductId::new(6));
        assert_eq!(reopened.items()[1].id, ProductId::new(2));
    }

    #[test]
    fn test_load_corrupt_data_gives_empty_cart() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "definitely not json").unwrap();

        let cart = open_cart(&store);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_drops_entry_whose_total_overflows() {
        let store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":1,"name":"A","price":"100000000000000000000","quantity":4294967295,"icon":"x"}]"#,
            )
            .unwrap();

        let cart = open_cart(&store);
        assert!(cart.is_empty());
        assert_eq!(cart.total_price().to_string(), "$0.00");
        assert!(!cart.summary().state.checkout_enabled());
    }

    #[test]
    fn test_add_refuses_to_overflow_total() {
        let catalog = Catalog::from_yaml_str(&format!(
            "- id: 1\n  name: Everything\n  price: \"{}\"\n",
            Decimal::MAX
        ))
        .unwrap();
        let store = MemoryStore::new();
        let mut cart = CartManager::open(store.clone(), catalog);
        let recorder = Recorder::default();
        cart.subscribe(recorder.clone());

        assert_eq!(cart.add_item(ProductId::new(1)).unwrap(), AddOutcome::Added);
        let stored = store.get(DEFAULT_STORAGE_KEY).unwrap();

        let result = cart.add_item(ProductId::new(1));

        assert!(matches!(result, Err(CartError::TotalOverflow)));
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), stored);
        assert_eq!(recorder.summaries.borrow().len(), 1);
        assert_eq!(cart.total_price().amount, Decimal::MAX);
    }

    #[test]
    fn test_custom_storage_key() {
        let store = MemoryStore::new();
        let mut cart =
            CartManager::new(store.clone(), Catalog::builtin()).with_storage_key("shop:cart");
        cart.add_item(ProductId::new(3)).unwrap();

        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
        assert!(store.get("shop:cart").unwrap().is_some());
        assert_eq!(cart.storage_key(), "shop:cart");
    }

    #[test]
    fn test_clear_persists_empty_state() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add_item(ProductId::new(1)).unwrap();

        cart.clear().unwrap();

        assert!(cart.is_empty());
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);

        assert!(matches!(cart.checkout(), Err(CartError::EmptyCart)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_checkout_returns_receipt_and_clears() {
        let store = MemoryStore::new();
        let mut cart = open_cart(&store);
        cart.add_item(ProductId::new(2)).unwrap();
        cart.add_item(ProductId::new(4)).unwrap();
        cart.add_item(ProductId::new(4)).unwrap();

        let receipt = cart.checkout().unwrap();

        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.total.to_string(), "$2657.00");
        assert_eq!(receipt.items.len(), 2);
        assert!(cart.is_empty());
        assert!(open_cart(&store).is_empty());
    }

    #[test]
    fn test_currency_applies_to_totals() {
        let mut cart =
            CartManager::new(MemoryStore::new(), Catalog::builtin()).with_currency(CurrencyCode::GBP);
        cart.add_item(ProductId::new(6)).unwrap();
        assert_eq!(cart.total_price().to_string(), "£599.00");
    }

    #[test]
    fn test_view_reflects_state() {
        let mut cart = open_cart(&MemoryStore::new());
        assert!(cart.view().is_empty);
        assert!(!cart.view().checkout_enabled);

        cart.add_item(ProductId::new(1)).unwrap();
        cart.add_item(ProductId::new(1)).unwrap();

        let view = cart.view();
        assert!(view.checkout_enabled);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "$1798.00");
        assert_eq!(view.items[0].price_line(), "$899 x 2");
    }

    #[test]
    fn test_store_failure_is_reported() {
        let mut cart = CartManager::open(ReadOnlyStore, Catalog::builtin());

        let result = cart.add_item(ProductId::new(1));

        assert!(matches!(result, Err(CartError::Store(_))));
        assert_eq!(cart.total_item_count(), 1);
    }
}
