//! Plain-text rendering of catalog and cart data.

use std::io::{self, Write};

use storefront_cart::{CartView, CheckoutReceipt, CurrencyCode, Notification, Price, Product};

/// One product card from the featured grid.
pub fn product_card(
    out: &mut impl Write,
    product: &Product,
    currency: CurrencyCode,
) -> io::Result<()> {
    match &product.badge {
        Some(badge) => writeln!(out, "[{}] {} ({badge})", product.id, product.name)?,
        None => writeln!(out, "[{}] {}", product.id, product.name)?,
    }
    if !product.description.is_empty() {
        writeln!(out, "    {}", product.description)?;
    }
    let price = Price::new(product.price, currency).display_compact();
    if product.category.is_empty() {
        writeln!(out, "    {price}")
    } else {
        writeln!(out, "    {price} | {}", product.category)
    }
}

/// The cart modal: line items and total, or the empty indicator.
pub fn cart_view(out: &mut impl Write, view: &CartView) -> io::Result<()> {
    if view.is_empty {
        writeln!(out, "Your cart is empty.")?;
        writeln!(out, "Checkout: disabled")?;
        return Ok(());
    }

    for item in &view.items {
        writeln!(
            out,
            "[{}] {:<28} {:>16} {:>12}",
            item.id,
            item.title,
            item.price_line(),
            item.line_price
        )?;
    }
    writeln!(out, "Items: {}", view.item_count)?;
    writeln!(out, "Total: {}", view.subtotal)
}

pub fn notification(out: &mut impl Write, notification: &Notification) -> io::Result<()> {
    writeln!(out, "* {}", notification.message)
}

pub fn receipt(out: &mut impl Write, receipt: &CheckoutReceipt) -> io::Result<()> {
    writeln!(
        out,
        "Proceeding to checkout. In a real store, this would redirect to a payment page."
    )?;
    writeln!(out, "Order:  {}", receipt.order_ref)?;
    writeln!(out, "Items:  {}", receipt.item_count)?;
    writeln!(out, "Total:  {}", receipt.total)
}
