//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! entity constructors and the service layer.

use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;

// ── Text length limits ──────────────────────────────────────────────

/// Category and variant names
pub const MAX_NAME_LEN: usize = 100;

/// Product names run longer (brand + model + qualifiers)
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Descriptions and alt text
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Short identifiers: brand, SKU, size, color, MIME type
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

/// Slugs (derived from names, plus room for hyphens)
pub const MAX_SLUG_LEN: usize = 120;

/// Variant attribute names
pub const MAX_ATTR_NAME_LEN: usize = 50;

/// Variant attribute values
pub const MAX_ATTR_VALUE_LEN: usize = 255;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: Option<&str>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that a decimal has at most `dp` decimal places.
pub fn validate_scale(value: Decimal, dp: u32, field: &str) -> AppResult<()> {
    if value.round_dp(dp) != value {
        return Err(AppError::validation(format!(
            "{field} must have at most {dp} decimal places"
        ))
        .with_detail("field", field)
        .with_detail("value", value.to_string()));
    }
    Ok(())
}

/// Validate that a decimal is strictly positive.
pub fn validate_positive(value: Decimal, field: &str) -> AppResult<()> {
    if value <= Decimal::ZERO {
        return Err(AppError::out_of_range(format!("{field} must be greater than 0"))
            .with_detail("field", field)
            .with_detail("value", value.to_string()));
    }
    Ok(())
}

/// Validate that a decimal sits within an inclusive range.
pub fn validate_range(value: Decimal, min: Decimal, max: Decimal, field: &str) -> AppResult<()> {
    if value < min || value > max {
        return Err(AppError::out_of_range(format!(
            "{field} must be between {min} and {max}"
        ))
        .with_detail("field", field)
        .with_detail("value", value.to_string()));
    }
    Ok(())
}

/// Validate that an integer quantity is non-negative.
pub fn validate_non_negative(value: i64, field: &str) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::out_of_range(format!("{field} must not be negative"))
            .with_detail("field", field)
            .with_detail("value", value));
    }
    Ok(())
}

/// Validate a variant name: alphanumeric plus space, hyphen, underscore.
pub fn validate_variant_name(value: &str) -> AppResult<()> {
    validate_required_text(value, "variant name", MAX_NAME_LEN)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(AppError::validation(
            "variant name may only contain letters, digits, spaces, hyphens and underscores",
        )
        .with_detail("field", "variant name")
        .with_detail("value", value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Phones", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(101), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(None, "brand", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(validate_optional_text(Some("Acme"), "brand", MAX_SHORT_TEXT_LEN).is_ok());
        assert!(
            validate_optional_text(Some(&"x".repeat(101)), "brand", MAX_SHORT_TEXT_LEN).is_err()
        );
    }

    #[test]
    fn test_scale() {
        assert!(validate_scale(dec("9.99"), 2, "price").is_ok());
        assert!(validate_scale(dec("10"), 2, "price").is_ok());
        assert!(validate_scale(dec("9.999"), 2, "price").is_err());
    }

    #[test]
    fn test_positive_and_range() {
        assert!(validate_positive(dec("0.01"), "price").is_ok());
        assert!(validate_positive(dec("0"), "price").is_err());
        assert!(validate_range(dec("4.5"), dec("0"), dec("5"), "rating").is_ok());
        assert!(validate_range(dec("5.1"), dec("0"), dec("5"), "rating").is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(validate_non_negative(0, "stock").is_ok());
        assert!(validate_non_negative(-1, "stock").is_err());
    }

    #[test]
    fn test_variant_name() {
        assert!(validate_variant_name("Red-L").is_ok());
        assert!(validate_variant_name("Size 42_EU").is_ok());
        assert!(validate_variant_name("Red/L").is_err());
        assert!(validate_variant_name("").is_err());
    }
}
