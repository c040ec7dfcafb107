//! Payload normalization.
//!
//! The backend sends order and cart data under different field names and
//! numeric encodings depending on the endpoint. These functions convert the
//! raw payloads into the canonical [`crate::models`] shapes with a defined
//! preference order per field. They are pure and never fail: unparsable
//! numerics coerce to a fallback, missing identifiers coerce to marker
//! strings, and the output is always structurally complete.

mod cart;
mod orders;

pub use cart::cart_item;
pub use orders::{order, order_item};

use serde_json::Value;

/// Coerce a JSON value to a finite number, falling back otherwise.
///
/// Accepts JSON numbers and numeric strings. Anything else - null, absent,
/// non-numeric strings, objects - yields the fallback, as does a value that
/// parses to something non-finite.
pub(crate) fn to_number(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Treat JSON null the same as an absent field.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Extract an integer id from a number or numeric string.
pub(crate) fn opt_id(value: Option<&Value>) -> Option<i64> {
    match present(value)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Extract a display string from a string or number value.
pub(crate) fn opt_string(value: Option<&Value>) -> Option<String> {
    match present(value)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
