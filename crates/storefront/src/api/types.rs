//! Wire payload types.
//!
//! Request bodies are plain serde structs. Response payloads for orders and
//! cart lines deliberately carry their fields as `serde_json::Value`: the
//! backend is inconsistent about field names (`items` vs `orderItems`,
//! `unitPrice` vs `price`, `totalAmount` vs `totalPrice`, nested `product`
//! vs flattened `productId`/`productName`) and about numeric encoding
//! (numbers, numeric strings, nulls). Decoding therefore never fails here;
//! [`super::conversions`] applies the preference rules and coercions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use myshop_core::SessionUser;

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /users/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    /// Build a request where the confirmation repeats the password; the
    /// backend still validates the pair.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            confirm_password: password.clone(),
            password,
        }
    }
}

/// Body of the admin product create/update endpoints.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

// =============================================================================
// Responses
// =============================================================================

/// Login/register response: a token plus the user record.
///
/// The user part is persisted verbatim as the session record.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub user: SessionUser,
}

/// Error body shape used by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Raw order payload, as heterogeneous as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderPayload {
    pub id: Option<Value>,
    pub order_number: Option<Value>,
    pub status: Option<Value>,
    pub created_at: Option<Value>,
    pub shipping_address: Option<Value>,
    pub total_amount: Option<Value>,
    pub total_price: Option<Value>,
    pub items: Option<Value>,
    pub order_items: Option<Value>,
    /// Everything else, passed through to the normalized order.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Raw order line payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItemPayload {
    pub id: Option<Value>,
    pub quantity: Option<Value>,
    pub unit_price: Option<Value>,
    pub price: Option<Value>,
    pub total_price: Option<Value>,
    pub product: Option<ProductRefPayload>,
    pub product_id: Option<Value>,
    pub product_name: Option<Value>,
    pub product_image_url: Option<Value>,
    pub image_url: Option<Value>,
}

/// Raw cart line payload. Same aliasing story as order lines.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemPayload {
    pub id: Option<Value>,
    pub quantity: Option<Value>,
    pub product: Option<ProductRefPayload>,
    pub price: Option<Value>,
    pub unit_price: Option<Value>,
    pub product_id: Option<Value>,
    pub product_name: Option<Value>,
    pub product_image_url: Option<Value>,
    pub image_url: Option<Value>,
}

/// Raw nested product reference inside order/cart lines.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRefPayload {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub image_url: Option<Value>,
}
