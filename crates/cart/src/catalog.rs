//! Static product catalog.
//!
//! The catalog is read-only once built. The cart only needs id lookups from
//! it, which go through the [`ProductLookup`] trait so tests and embedders
//! can supply their own product source.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use storefront_cart_core::{Product, ProductId};

/// Errors that can occur when building a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product failed validation.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: String },

    /// The catalog file could not be read.
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a valid YAML product list.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Product lookup by id.
pub trait ProductLookup {
    /// Find the product with the given id.
    fn find_by_id(&self, id: ProductId) -> Option<&Product>;
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_by_id(id)
    }
}

/// An ordered, validated list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if ids repeat, a name is blank or a price is
    /// negative.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::InvalidProduct {
                    id: product.id,
                    reason: "name cannot be empty".to_string(),
                });
            }
            if product.price < Decimal::ZERO {
                return Err(CatalogError::InvalidProduct {
                    id: product.id,
                    reason: format!("price cannot be negative (got {})", product.price),
                });
            }
        }
        Ok(Self { products })
    }

    /// Parse a YAML list of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML, or a validation
    /// error as described in [`Catalog::new`].
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_yaml::from_str(yaml)?;
        Self::new(products)
    }

    /// Load a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as
    /// [`Catalog::from_yaml_str`].
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// The default storefront catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: vec![
                builtin_product(
                    1,
                    "Samsung Galaxy S23",
                    "Latest smartphone with advanced camera and performance",
                    899,
                    "smartphones",
                    "New",
                    "fas fa-mobile-alt",
                ),
                builtin_product(
                    2,
                    "Apple MacBook Pro 14\"",
                    "Powerful laptop for professionals and creatives",
                    1999,
                    "laptops",
                    "Best Seller",
                    "fas fa-laptop",
                ),
                builtin_product(
                    3,
                    "Sony 65\" 4K OLED TV",
                    "Immersive entertainment with perfect blacks",
                    1799,
                    "tv",
                    "Sale",
                    "fas fa-tv",
                ),
                builtin_product(
                    4,
                    "Bose QuietComfort 45",
                    "Noise cancelling headphones with premium sound",
                    329,
                    "audio",
                    "Popular",
                    "fas fa-headphones",
                ),
                builtin_product(
                    5,
                    "iPhone 14 Pro",
                    "Apple's flagship with Dynamic Island",
                    999,
                    "smartphones",
                    "New",
                    "fas fa-mobile-alt",
                ),
                builtin_product(
                    6,
                    "Dyson V11 Vacuum",
                    "Cordless vacuum with powerful suction",
                    599,
                    "appliances",
                    "Trending",
                    "fas fa-home",
                ),
            ],
        }
    }

    /// Products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products in the given category, in catalog order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for Catalog {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

fn builtin_product(
    id: i32,
    name: &str,
    description: &str,
    price: i64,
    category: &str,
    badge: &str,
    icon: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::new(price, 0),
        category: category.to_string(),
        badge: Some(badge.to_string()),
        icon: icon.to_string(),
    }
}
