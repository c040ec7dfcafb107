//! Canonical view models.
//!
//! These are the shapes the rest of the application works with. Backend
//! payloads never reach consumers directly: order and cart responses go
//! through [`crate::api::conversions`] first, so field-name aliasing and
//! malformed numerics stop at the API boundary.
//!
//! Ownership: each fetch produces a fresh value that replaces the previous
//! one wholesale; nothing patches these structures incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use myshop_core::{CartItemId, OrderId, ProductId};

/// Product reference carried inside a normalized order item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Option<ProductId>,
    /// Display name; `"Product"` when the backend supplied none.
    pub name: String,
    /// Absent triggers the presentational fallback image.
    pub image_url: Option<String>,
}

/// A single line of a normalized order.
///
/// All numeric fields are finite by construction; see
/// [`crate::api::conversions::order_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Backend item id, or a synthesized `<product>-<name>` marker.
    pub id: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub product: ProductSummary,
}

/// A normalized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<OrderId>,
    /// Human-readable number: backend-supplied, else `#<id>`, else `N/A`.
    pub order_number: String,
    /// Raw status string; kept untyped so unknown statuses survive.
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub shipping_address: Option<String>,
    pub total_amount: f64,
    pub items: Vec<OrderItem>,
    /// Order fields we do not model, passed through unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Product reference carried inside a normalized cart item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: Option<ProductId>,
    pub name: String,
    /// Unit price; 0 when the backend supplied nothing usable.
    pub price: f64,
    pub image_url: Option<String>,
}

/// A normalized cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub quantity: f64,
    pub product: CartProduct,
}

impl CartItem {
    /// Price of this line (`unit price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity
    }
}

/// A catalog product as returned by the products endpoints.
///
/// Unlike orders and cart lines, the products endpoints are shape-stable,
/// so this deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
