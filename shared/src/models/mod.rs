//! Catalog entity models
//!
//! Each model file carries the entity struct plus its `*Create` / `*Update`
//! payload structs. Entities are mutated only through their own methods so
//! local invariants (stock non-negativity, status-vs-stock consistency,
//! field formats) hold after every successful call.

pub mod category;
pub mod image;
pub mod product;
pub mod variant;

pub use category::{Category, CategoryCreate, CategoryNode, CategoryUpdate};
pub use image::{ImageCreate, ImageType, ImageUpdate, ProductImage};
pub use product::{Product, ProductCreate, ProductStatus, ProductUpdate};
pub use variant::{ProductVariant, VariantCreate, VariantUpdate};

use crate::error::{AppError, AppResult, ErrorCode};

/// Apply a stock delta to a current quantity, rejecting negative results.
///
/// Shared by product and variant stock mutation: `current + delta` must stay
/// non-negative and representable, and a rejected call leaves the caller's
/// state untouched.
pub fn checked_stock_delta(current: i64, delta: i64) -> AppResult<i64> {
    let Some(next) = current.checked_add(delta) else {
        return Err(
            AppError::out_of_range(format!("stock delta overflows ({} + {})", current, delta))
                .with_detail("current", current)
                .with_detail("delta", delta),
        );
    };
    if next < 0 {
        return Err(AppError::with_message(
            ErrorCode::InsufficientStock,
            format!("stock would become negative ({} + {})", current, delta),
        )
        .with_detail("current", current)
        .with_detail("delta", delta));
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_stock_delta_accepts_non_negative() {
        assert_eq!(checked_stock_delta(5, -5).unwrap(), 0);
        assert_eq!(checked_stock_delta(0, 3).unwrap(), 3);
        assert_eq!(checked_stock_delta(10, -4).unwrap(), 6);
    }

    #[test]
    fn test_checked_stock_delta_rejects_negative() {
        let err = checked_stock_delta(2, -3).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        let details = err.details.unwrap();
        assert_eq!(details.get("current").unwrap(), 2);
        assert_eq!(details.get("delta").unwrap(), -3);
    }

    #[test]
    fn test_checked_stock_delta_rejects_overflow() {
        let err = checked_stock_delta(1, i64::MAX).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        assert_eq!(checked_stock_delta(0, i64::MAX).unwrap(), i64::MAX);
    }
}
