//! Cart commands.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use storefront_cart::{AddOutcome, CartListener, Notification, ProductId};
use tracing::info;

use crate::commands::Context;
use crate::render;

/// Collects notifications raised while a command runs.
#[derive(Default, Clone)]
struct NotificationBuffer(Rc<RefCell<Vec<Notification>>>);

impl CartListener for NotificationBuffer {
    fn on_notification(&self, notification: &Notification) {
        self.0.borrow_mut().push(notification.clone());
    }
}

/// Add each id in turn. Unknown ids are skipped without failing.
///
/// Stops at the first id that cannot be added. Notifications for the ids
/// added before it are still printed.
///
/// # Errors
///
/// Returns an error if an id cannot be added or output fails.
pub fn add(
    ctx: &Context,
    ids: &[ProductId],
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = ctx.open_cart();
    let notifications = NotificationBuffer::default();
    cart.subscribe(notifications.clone());

    let mut result = Ok(());
    for &id in ids {
        match cart.add_item(id) {
            Ok(AddOutcome::UnknownProduct) => info!(%id, "Skipped unknown product"),
            Ok(_) => {}
            Err(e) => {
                result = Err(e);
                break;
            }
        }
    }

    for notification in notifications.0.borrow().iter() {
        render::notification(out, notification)?;
    }
    result?;
    writeln!(out, "Cart: {} item(s)", cart.total_item_count())?;
    Ok(())
}

/// Remove a line item.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved or output fails.
pub fn remove(
    ctx: &Context,
    id: ProductId,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = ctx.open_cart();
    if cart.remove_item(id)? {
        writeln!(out, "Removed product {id}.")?;
    } else {
        writeln!(out, "Product {id} is not in your cart.")?;
    }
    writeln!(out, "Cart: {} item(s)", cart.total_item_count())?;
    Ok(())
}

/// Print the cart, as text or as the JSON cart view.
///
/// # Errors
///
/// Returns an error if output or JSON encoding fails.
pub fn show(
    ctx: &Context,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = ctx.open_cart().view();
    if json {
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
    } else {
        render::cart_view(out, &view)?;
    }
    Ok(())
}

/// Check out the cart.
///
/// # Errors
///
/// Returns `CartError::EmptyCart` for an empty cart, or an error if the
/// cleared cart cannot be saved.
pub fn checkout(ctx: &Context, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let receipt = ctx.open_cart().checkout()?;
    render::receipt(out, &receipt)?;
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved or output fails.
pub fn clear(ctx: &Context, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    ctx.open_cart().clear()?;
    writeln!(out, "Cart cleared.")?;
    Ok(())
}
