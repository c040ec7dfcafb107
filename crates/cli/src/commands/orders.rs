//! Order commands: checkout, history, and admin management.

#![allow(clippy::print_stdout)]

use myshop_core::{OrderId, OrderStatus};
use myshop_storefront::filters::format_usd;
use myshop_storefront::models::Order;
use myshop_storefront::state::AppState;

use super::CommandResult;

fn print_order_line(order: &Order) {
    let created = order
        .created_at
        .map_or_else(|| "unknown date".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
    println!(
        "{:<10} {:<12} {:>12}  {}",
        order.order_number,
        order.status,
        format_usd(order.total_amount),
        created,
    );
}

fn print_order(order: &Order) {
    print_order_line(order);
    for item in &order.items {
        println!(
            "        {:<32} x{:<4} {:>12}",
            item.product.name,
            item.quantity,
            format_usd(item.total_price),
        );
    }
    if let Some(address) = &order.shipping_address {
        println!("        ship to: {address}");
    }
}

/// Turn the cart into an order.
pub async fn checkout(state: &AppState) -> CommandResult {
    super::check_access(state, None)?;
    let order = state.api().create_order().await?;
    println!("Order placed:");
    print_order(&order);
    // The backend emptied the cart; re-fetch so local state agrees.
    state.cart().refresh().await;
    Ok(())
}

/// List the caller's orders.
pub async fn list(state: &AppState) -> CommandResult {
    super::check_access(state, None)?;
    let orders = state.api().list_orders().await?;
    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }
    for order in &orders {
        print_order_line(order);
    }
    Ok(())
}

/// Show one order in full.
pub async fn show(state: &AppState, id: OrderId) -> CommandResult {
    super::check_access(state, None)?;
    let order = state.api().get_order(id).await?;
    print_order(&order);
    Ok(())
}

/// List every order in the shop (admin).
pub async fn list_all(state: &AppState) -> CommandResult {
    super::check_access(state, Some("ADMIN"))?;
    let orders = state.api().list_all_orders().await?;
    if orders.is_empty() {
        println!("No orders in the shop");
        return Ok(());
    }
    for order in &orders {
        print_order_line(order);
    }
    Ok(())
}

/// Set an order's status (admin).
pub async fn set_status(state: &AppState, id: OrderId, status: OrderStatus) -> CommandResult {
    super::check_access(state, Some("ADMIN"))?;
    let order = state.api().update_order_status(id, status).await?;
    println!("Order {} is now {}", order.order_number, order.status);
    Ok(())
}
