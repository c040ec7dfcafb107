//! Order normalization.

use chrono::{DateTime, Utc};
use serde_json::Value;

use myshop_core::{OrderId, ProductId};

use crate::api::types::{OrderItemPayload, OrderPayload};
use crate::models::{Order, OrderItem, ProductSummary};

use super::{opt_id, opt_string, present, to_number};

/// Fallback product name for items the backend left anonymous.
const UNNAMED_PRODUCT: &str = "Product";

/// Order number shown when the backend supplied neither a number nor an id.
const NO_ORDER_NUMBER: &str = "N/A";

/// Normalize a single order line.
///
/// Preference chains per field:
/// - quantity: `quantity`, else 0
/// - unit price: `unitPrice`, else `price`, else 0
/// - total: `totalPrice`, else `unit price * quantity`
/// - product fields: nested `product.*`, else flattened siblings
///   (`productId`, `productName`, `productImageUrl`/`imageUrl`)
///
/// Every numeric output is finite; a missing item id is synthesized from
/// the product id (or `"item"`) and the product name.
#[must_use]
pub fn order_item(raw: &OrderItemPayload) -> OrderItem {
    let quantity = to_number(present(raw.quantity.as_ref()), 0.0);
    let unit_price = to_number(
        present(raw.unit_price.as_ref()).or_else(|| present(raw.price.as_ref())),
        0.0,
    );
    let total_price = to_number(present(raw.total_price.as_ref()), unit_price * quantity);

    let nested = raw.product.clone().unwrap_or_default();
    let product_id = opt_id(nested.id.as_ref())
        .or_else(|| opt_id(raw.product_id.as_ref()))
        .map(ProductId::new);
    let product_name = opt_string(nested.name.as_ref())
        .or_else(|| opt_string(raw.product_name.as_ref()))
        .unwrap_or_else(|| UNNAMED_PRODUCT.to_string());
    let product_image = opt_string(nested.image_url.as_ref())
        .or_else(|| opt_string(raw.product_image_url.as_ref()))
        .or_else(|| opt_string(raw.image_url.as_ref()));

    let id = opt_string(raw.id.as_ref()).unwrap_or_else(|| {
        let owner = product_id.map_or_else(|| "item".to_string(), |p| p.to_string());
        format!("{owner}-{product_name}")
    });

    OrderItem {
        id,
        quantity,
        unit_price,
        total_price,
        product: ProductSummary {
            id: product_id,
            name: product_name,
            image_url: product_image,
        },
    }
}

/// Normalize an order.
///
/// Items are taken from `items` or `orderItems` (empty when neither is an
/// array). `totalAmount` prefers the backend-declared total (`totalAmount`,
/// then `totalPrice`) over the sum of item totals, even when inconsistent
/// with the items. The order number falls back to `#<id>`, then `N/A`.
#[must_use]
pub fn order(raw: &OrderPayload) -> Order {
    let items: Vec<OrderItem> = item_array(raw.items.as_ref())
        .or_else(|| item_array(raw.order_items.as_ref()))
        .unwrap_or_default()
        .iter()
        .map(order_item)
        .collect();

    let inferred_total: f64 = items.iter().map(|item| item.total_price).sum();
    let total_amount = to_number(
        present(raw.total_amount.as_ref()).or_else(|| present(raw.total_price.as_ref())),
        inferred_total,
    );

    let id = opt_id(raw.id.as_ref()).map(OrderId::new);
    let order_number = opt_string(raw.order_number.as_ref()).unwrap_or_else(|| {
        id.map_or_else(|| NO_ORDER_NUMBER.to_string(), |id| format!("#{id}"))
    });

    Order {
        id,
        order_number,
        status: opt_string(raw.status.as_ref()).unwrap_or_default(),
        created_at: parse_timestamp(raw.created_at.as_ref()),
        shipping_address: opt_string(raw.shipping_address.as_ref()),
        total_amount,
        items,
        extra: raw.extra.clone(),
    }
}

/// Decode an array of order line payloads, if the value is an array.
fn item_array(value: Option<&Value>) -> Option<Vec<OrderItemPayload>> {
    let elements = value?.as_array()?;
    Some(
        elements
            .iter()
            .map(|el| serde_json::from_value(el.clone()).unwrap_or_default())
            .collect(),
    )
}

/// Parse a backend timestamp leniently; anything unparsable becomes `None`.
fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let s = present(value)?.as_str()?;
    // RFC 3339 first, then the bare LocalDateTime form the backend favors
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> OrderPayload {
        serde_json::from_value(value).unwrap()
    }

    fn item_payload(value: Value) -> OrderItemPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_item_total_derived_from_unit_price() {
        let item = order_item(&item_payload(json!({
            "quantity": 2,
            "unitPrice": 24.99,
        })));
        assert_eq!(item.quantity, 2.0);
        assert_eq!(item.unit_price, 24.99);
        assert_eq!(item.total_price, 49.98);
    }

    #[test]
    fn test_item_price_alias() {
        let item = order_item(&item_payload(json!({
            "quantity": 3,
            "price": "10.50",
        })));
        assert_eq!(item.unit_price, 10.5);
        assert_eq!(item.total_price, 31.5);
    }

    #[test]
    fn test_item_explicit_total_wins() {
        let item = order_item(&item_payload(json!({
            "quantity": 2,
            "unitPrice": 24.99,
            "totalPrice": 40,
        })));
        assert_eq!(item.total_price, 40.0);
    }

    #[test]
    fn test_item_malformed_numerics_stay_finite() {
        let item = order_item(&item_payload(json!({
            "quantity": "many",
            "unitPrice": null,
            "price": {"amount": 3},
            "totalPrice": "NaN",
        })));
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.unit_price, 0.0);
        assert_eq!(item.total_price, 0.0);
        assert!(item.total_price.is_finite());
    }

    #[test]
    fn test_item_product_from_nested_object() {
        let item = order_item(&item_payload(json!({
            "id": 7,
            "product": {"id": 3, "name": "Mug", "imageUrl": "/mug.png"},
        })));
        assert_eq!(item.id, "7");
        assert_eq!(item.product.id, Some(ProductId::new(3)));
        assert_eq!(item.product.name, "Mug");
        assert_eq!(item.product.image_url.as_deref(), Some("/mug.png"));
    }

    #[test]
    fn test_item_product_from_flattened_fields() {
        let item = order_item(&item_payload(json!({
            "productId": "9",
            "productName": "Lamp",
            "imageUrl": "/lamp.png",
        })));
        assert_eq!(item.product.id, Some(ProductId::new(9)));
        assert_eq!(item.product.name, "Lamp");
        assert_eq!(item.product.image_url.as_deref(), Some("/lamp.png"));
    }

    #[test]
    fn test_item_nested_fields_win_per_field() {
        // product object present but sparse: missing pieces still fall back
        let item = order_item(&item_payload(json!({
            "product": {"name": "Desk"},
            "productId": 4,
            "productImageUrl": "/desk.png",
        })));
        assert_eq!(item.product.id, Some(ProductId::new(4)));
        assert_eq!(item.product.name, "Desk");
        assert_eq!(item.product.image_url.as_deref(), Some("/desk.png"));
    }

    #[test]
    fn test_item_id_synthesized_when_missing() {
        let anonymous = order_item(&item_payload(json!({})));
        assert_eq!(anonymous.id, "item-Product");
        assert_eq!(anonymous.product.name, "Product");

        let named = order_item(&item_payload(json!({
            "productId": 5,
            "productName": "Chair",
        })));
        assert_eq!(named.id, "5-Chair");
    }

    #[test]
    fn test_order_total_derived_from_items() {
        let order = order(&payload(json!({
            "orderItems": [{"quantity": 2, "unitPrice": 24.99}],
        })));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items.first().unwrap().total_price, 49.98);
        assert_eq!(order.total_amount, 49.98);
    }

    #[test]
    fn test_order_explicit_total_wins_over_sum() {
        let order = order(&payload(json!({
            "totalPrice": 99,
            "items": [{"quantity": 2, "unitPrice": 24.99}],
        })));
        assert_eq!(order.total_amount, 99.0);
    }

    #[test]
    fn test_order_total_amount_preferred_over_total_price() {
        let order = order(&payload(json!({
            "totalAmount": 80,
            "totalPrice": 99,
        })));
        assert_eq!(order.total_amount, 80.0);
    }

    #[test]
    fn test_order_number_falls_back_to_id() {
        let with_id = order(&payload(json!({"id": 12})));
        assert_eq!(with_id.order_number, "#12");
        assert_eq!(with_id.id, Some(OrderId::new(12)));

        let without_id = order(&payload(json!({})));
        assert_eq!(without_id.order_number, "N/A");
        assert_eq!(without_id.id, None);
    }

    #[test]
    fn test_order_supplied_number_wins() {
        let order = order(&payload(json!({"id": 12, "orderNumber": "SO-0012"})));
        assert_eq!(order.order_number, "SO-0012");
    }

    #[test]
    fn test_order_items_default_to_empty() {
        let order = order(&payload(json!({"items": "not-an-array"})));
        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, 0.0);
    }

    #[test]
    fn test_order_passes_unknown_fields_through() {
        let order = order(&payload(json!({
            "id": 1,
            "status": "SHIPPED",
            "trackingCode": "ZX-99",
        })));
        assert_eq!(order.status, "SHIPPED");
        assert_eq!(order.extra.get("trackingCode"), Some(&json!("ZX-99")));
    }

    #[test]
    fn test_order_timestamp_lenient() {
        let ok = order(&payload(json!({"createdAt": "2026-05-04T10:15:30"})));
        assert!(ok.created_at.is_some());

        let bad = order(&payload(json!({"createdAt": "yesterday"})));
        assert!(bad.created_at.is_none());
    }

    #[test]
    fn test_order_shipping_address_defaults_absent() {
        let order = order(&payload(json!({"shippingAddress": null})));
        assert!(order.shipping_address.is_none());
    }
}
