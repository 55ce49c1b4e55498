//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CART_STORE_PATH` - Store file (default: `.storefront-cart/storage.json`)
//! - `CART_STORAGE_KEY` - Key the cart is saved under (default: `cart`)
//! - `CART_CATALOG_PATH` - YAML product catalog (default: built-in catalog)
//! - `CART_CURRENCY` - ISO 4217 code used for totals (default: `USD`)
//! - `CART_LOG_FORMAT` - `text` or `json` (default: `text`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use storefront_cart_core::CurrencyCode;

use crate::cart::DEFAULT_STORAGE_KEY;

const DEFAULT_STORE_PATH: &str = ".storefront-cart/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Cart application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// File backing the key-value store
    pub store_path: PathBuf,
    /// Key the cart is persisted under
    pub storage_key: String,
    /// Optional YAML catalog replacing the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Currency used when displaying totals
    pub currency: CurrencyCode,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog_path: None,
            currency: CurrencyCode::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_path = get_optional(&lookup, "CART_STORE_PATH")
            .map_or(defaults.store_path, PathBuf::from);

        let storage_key = match get_optional(&lookup, "CART_STORAGE_KEY") {
            Some(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "CART_STORAGE_KEY".to_string(),
                    "cannot be empty".to_string(),
                ));
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let catalog_path = get_optional(&lookup, "CART_CATALOG_PATH").map(PathBuf::from);

        let currency = get_parsed(&lookup, "CART_CURRENCY")?.unwrap_or(defaults.currency);
        let log_format = get_parsed(&lookup, "CART_LOG_FORMAT")?.unwrap_or(defaults.log_format);

        Ok(Self {
            store_path,
            storage_key,
            catalog_path,
            currency,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating empty values as unset.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty())
}

/// Get an optional variable and parse it.
fn get_parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    get_optional(lookup, key)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}
