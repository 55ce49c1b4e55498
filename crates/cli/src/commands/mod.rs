//! Command implementations.

pub mod cart;
pub mod catalog;

use storefront_cart::{CartConfig, CartManager, Catalog, CatalogError, FileStore};
use tracing::debug;

/// Loaded configuration and catalog shared by every command.
pub struct Context {
    pub config: CartConfig,
    pub catalog: Catalog,
}

impl Context {
    /// Resolve the catalog named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a configured catalog file cannot be loaded.
    pub fn load(config: CartConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::builtin(),
        };
        debug!(
            store = %config.store_path.display(),
            products = catalog.len(),
            "Context loaded"
        );
        Ok(Self { config, catalog })
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> CartManager<FileStore, &Catalog> {
        let mut cart = CartManager::new(FileStore::new(&self.config.store_path), &self.catalog)
            .with_storage_key(self.config.storage_key.clone())
            .with_currency(self.config.currency);
        cart.load();
        cart
    }
}
