//! Display helpers shared by storefront consumers.

/// Placeholder shown when a product has no usable image.
pub const FALLBACK_IMAGE: &str = "/product-placeholder.svg";

/// Format a value as US dollars, e.g. `$1,234.56`.
///
/// Non-finite values render as `$0.00`.
#[must_use]
pub fn format_usd(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let negative = value < 0.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let rem = cents % 100;

    // Insert thousands separators
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{rem:02}")
}

/// Resolve a product image URL, falling back to the placeholder for
/// missing or blank values.
#[must_use]
pub fn product_image(image_url: Option<&str>) -> &str {
    match image_url.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => FALLBACK_IMAGE,
    }
}
