//! Featured product listing.

use std::io::Write;

use crate::commands::Context;
use crate::render;

/// Print the product grid, optionally limited to one category.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(
    ctx: &Context,
    category: Option<&str>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let products: Vec<_> = match category {
        Some(category) => ctx.catalog.in_category(category).collect(),
        None => ctx.catalog.products().iter().collect(),
    };

    if products.is_empty() {
        writeln!(out, "No products found.")?;
        return Ok(());
    }

    for product in products {
        render::product_card(out, product, ctx.config.currency)?;
    }
    Ok(())
}
