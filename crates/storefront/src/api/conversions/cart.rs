//! Cart line normalization.

use myshop_core::{CartItemId, ProductId};

use crate::api::types::CartItemPayload;
use crate::models::{CartItem, CartProduct};

use super::{opt_id, opt_string, present, to_number};

/// Normalize a cart line.
///
/// Unit price preference: nested `product.price`, else flattened `price`,
/// else `unitPrice` (the shape the cart endpoint itself uses), else 0.
/// Product identity/name/image follow the same nested-then-flattened rules
/// as order lines.
#[must_use]
pub fn cart_item(raw: &CartItemPayload) -> CartItem {
    let nested = raw.product.clone().unwrap_or_default();

    let price = to_number(
        present(nested.price.as_ref())
            .or_else(|| present(raw.price.as_ref()))
            .or_else(|| present(raw.unit_price.as_ref())),
        0.0,
    );

    CartItem {
        id: CartItemId::new(opt_id(raw.id.as_ref()).unwrap_or_default()),
        quantity: to_number(present(raw.quantity.as_ref()), 0.0),
        product: CartProduct {
            id: opt_id(nested.id.as_ref())
                .or_else(|| opt_id(raw.product_id.as_ref()))
                .map(ProductId::new),
            name: opt_string(nested.name.as_ref())
                .or_else(|| opt_string(raw.product_name.as_ref()))
                .unwrap_or_else(|| "Product".to_string()),
            price,
            image_url: opt_string(nested.image_url.as_ref())
                .or_else(|| opt_string(raw.product_image_url.as_ref()))
                .or_else(|| opt_string(raw.image_url.as_ref())),
        },
    }
}
