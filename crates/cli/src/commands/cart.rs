//! Cart commands.
//!
//! Every mutation goes through the cart service, so the printed cart is
//! always the backend's version of events, not local arithmetic.

#![allow(clippy::print_stdout)]

use myshop_core::{CartItemId, ProductId};
use myshop_storefront::filters::format_usd;
use myshop_storefront::state::AppState;

use super::CommandResult;

fn print_cart(state: &AppState) {
    let snapshot = state.cart().snapshot();
    if let Some(error) = &snapshot.error {
        println!("warning: {error}");
    }
    if snapshot.items.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in &snapshot.items {
        println!(
            "{:>6}  {:<32} x{:<4} {:>12}",
            i64::from(item.id),
            item.product.name,
            item.quantity,
            format_usd(item.line_total()),
        );
    }
    println!(
        "Total: {} ({} items)",
        format_usd(state.cart().total_price()),
        state.cart().total_items(),
    );
}

/// Show the cart.
pub async fn show(state: &AppState) -> CommandResult {
    super::check_access(state, None)?;
    state.cart().refresh().await;
    print_cart(state);
    Ok(())
}

/// Add a product to the cart.
pub async fn add(state: &AppState, product_id: ProductId, quantity: u32) -> CommandResult {
    super::check_access(state, None)?;
    state.cart().add(product_id, quantity).await?;
    print_cart(state);
    Ok(())
}

/// Change the quantity of a cart line.
pub async fn update(state: &AppState, item_id: CartItemId, quantity: u32) -> CommandResult {
    super::check_access(state, None)?;
    state.cart().update_quantity(item_id, quantity).await?;
    print_cart(state);
    Ok(())
}

/// Remove a cart line.
pub async fn remove(state: &AppState, item_id: CartItemId) -> CommandResult {
    super::check_access(state, None)?;
    state.cart().remove(item_id).await?;
    print_cart(state);
    Ok(())
}

/// Empty the cart.
pub async fn clear(state: &AppState) -> CommandResult {
    super::check_access(state, None)?;
    state.cart().clear().await?;
    println!("Cart cleared");
    Ok(())
}
