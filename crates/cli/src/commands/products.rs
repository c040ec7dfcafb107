//! Product catalog commands.
//!
//! Browsing is anonymous; `add`, `update`, and `remove` go through the
//! admin guard first.

#![allow(clippy::print_stdout)]

use myshop_core::ProductId;
use myshop_storefront::api::types::ProductInput;
use myshop_storefront::filters::format_usd;
use myshop_storefront::models::Product;
use myshop_storefront::state::AppState;

use super::CommandResult;

fn print_product(product: &Product) {
    println!(
        "{:>6}  {:<32} {:>12}  stock: {}",
        i64::from(product.id),
        product.name,
        format_usd(product.price),
        product.stock.unwrap_or(0),
    );
}

/// List all products.
pub async fn list(state: &AppState) -> CommandResult {
    let products = state.api().list_products().await?;
    if products.is_empty() {
        println!("No products");
        return Ok(());
    }
    for product in &products {
        print_product(product);
    }
    Ok(())
}

/// Show one product in full.
pub async fn show(state: &AppState, id: ProductId) -> CommandResult {
    let product = state.api().get_product(id).await?;
    println!("{} ({})", product.name, product.id);
    println!("  price: {}", format_usd(product.price));
    println!("  stock: {}", product.stock.unwrap_or(0));
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    Ok(())
}

/// Add a product (admin).
pub async fn add(
    state: &AppState,
    name: &str,
    price: f64,
    description: Option<String>,
    stock: i64,
    image_url: Option<String>,
) -> CommandResult {
    super::check_access(state, Some("ADMIN"))?;
    let input = ProductInput {
        name: name.to_string(),
        description,
        price,
        image_url,
        stock: Some(stock),
    };
    let product = state.api().create_product(&input).await?;
    println!("Created product {}", product.id);
    Ok(())
}

/// Update a product (admin).
pub async fn update(
    state: &AppState,
    id: ProductId,
    name: &str,
    price: f64,
    description: Option<String>,
    stock: i64,
    image_url: Option<String>,
) -> CommandResult {
    super::check_access(state, Some("ADMIN"))?;
    let input = ProductInput {
        name: name.to_string(),
        description,
        price,
        image_url,
        stock: Some(stock),
    };
    let product = state.api().update_product(id, &input).await?;
    println!("Updated product {}", product.id);
    Ok(())
}

/// Remove a product (admin).
pub async fn remove(state: &AppState, id: ProductId) -> CommandResult {
    super::check_access(state, Some("ADMIN"))?;
    state.api().delete_product(id).await?;
    println!("Deleted product {id}");
    Ok(())
}
