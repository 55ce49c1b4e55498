//! Storefront Cart CLI - Browse the catalog and manage the cart.
//!
//! # Usage
//!
//! ```bash
//! # List featured products
//! cart catalog
//!
//! # Add two phones and a pair of headphones
//! cart add 1 1 4
//!
//! # Show the cart (or as JSON)
//! cart show
//! cart show --json
//!
//! # Remove a line item, check out, or empty the cart
//! cart remove 1
//! cart checkout
//! cart clear
//! ```
//!
//! The cart is kept in a JSON store file (`CART_STORE_PATH`, or `--store`)
//! so it survives between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_cart::{CartConfig, LogFormat, ProductId};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about = "Storefront cart tools")]
struct Cli {
    /// Store file (overrides `CART_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// YAML catalog file (overrides `CART_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List featured products
    Catalog {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add products to the cart (unknown ids are skipped)
    Add {
        /// Product ids, repeated ids add more units
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Show the cart
    Show {
        /// Print the cart view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check out and empty the cart
    Checkout,
    /// Empty the cart
    Clear,
}

fn main() {
    let cli = Cli::parse();

    let config = match CartConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    if let Err(e) = run(cli, config) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, logging to stderr so command output
/// on stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to warnings from the library if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_cart=warn,storefront_cart_cli=info".into());

    let (text, json) = match format {
        LogFormat::Text => (Some(fmt::layer().with_writer(std::io::stderr)), None),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text)
        .with(json)
        .init();
}

fn run(cli: Cli, mut config: CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let ctx = commands::Context::load(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Catalog { category } => {
            commands::catalog::list(&ctx, category.as_deref(), &mut out)?;
        }
        Commands::Add { ids } => commands::cart::add(&ctx, &ids, &mut out)?,
        Commands::Remove { id } => commands::cart::remove(&ctx, id, &mut out)?,
        Commands::Show { json } => commands::cart::show(&ctx, json, &mut out)?,
        Commands::Checkout => commands::cart::checkout(&ctx, &mut out)?,
        Commands::Clear => commands::cart::clear(&ctx, &mut out)?,
    }
    Ok(())
}
