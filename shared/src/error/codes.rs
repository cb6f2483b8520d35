//! Unified error codes for the catalog backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 60xx: Product errors
//! - 61xx: Category errors
//! - 62xx: Variant errors
//! - 63xx: Image errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 60xx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Stock decrement would go negative
    InsufficientStock = 6003,
    /// Status change conflicts with stock level
    InvalidStatusTransition = 6004,
    /// SKU already exists
    SkuExists = 6005,

    // ==================== 61xx: Category ====================
    /// Category not found
    CategoryNotFound = 6101,
    /// Category has products
    CategoryHasProducts = 6102,
    /// Category name already exists
    CategoryNameExists = 6103,
    /// Category slug already exists
    CategorySlugExists = 6104,
    /// Category has subcategories
    CategoryHasChildren = 6105,
    /// Parent assignment would create a cycle
    CategoryCyclicParent = 6106,

    // ==================== 62xx: Variant ====================
    /// Variant not found
    VariantNotFound = 6201,
    /// Variant name already exists within the product
    VariantNameExists = 6202,
    /// Attribute name or value is invalid
    InvalidAttribute = 6203,

    // ==================== 63xx: Image ====================
    /// Image not found
    ImageNotFound = 6301,
    /// Product already has a primary image
    DuplicatePrimaryImage = 6302,
    /// Cannot remove the last image of a product
    LastImageRemoval = 6303,
    /// Display order already in use within the product
    DisplayOrderConflict = 6304,
    /// Cannot remove the primary image while others remain
    PrimaryImageRemoval = 6305,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::InsufficientStock => "Insufficient stock",
            ErrorCode::InvalidStatusTransition => {
                "Status change conflicts with current stock level"
            }
            ErrorCode::SkuExists => "SKU already exists",

            // Category
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category has associated products",
            ErrorCode::CategoryNameExists => "Category name already exists",
            ErrorCode::CategorySlugExists => "Category slug already exists",
            ErrorCode::CategoryHasChildren => "Category has subcategories",
            ErrorCode::CategoryCyclicParent => "Parent assignment would create a cycle",

            // Variant
            ErrorCode::VariantNotFound => "Variant not found",
            ErrorCode::VariantNameExists => "Variant name already exists for this product",
            ErrorCode::InvalidAttribute => "Attribute name or value is invalid",

            // Image
            ErrorCode::ImageNotFound => "Image not found",
            ErrorCode::DuplicatePrimaryImage => "Product already has a primary image",
            ErrorCode::LastImageRemoval => "Cannot remove the last image of a product",
            ErrorCode::DisplayOrderConflict => "Display order already in use",
            ErrorCode::PrimaryImageRemoval => {
                "Cannot remove the primary image while other images remain"
            }

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::InsufficientStock),
            6004 => Ok(ErrorCode::InvalidStatusTransition),
            6005 => Ok(ErrorCode::SkuExists),

            // Category
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasProducts),
            6103 => Ok(ErrorCode::CategoryNameExists),
            6104 => Ok(ErrorCode::CategorySlugExists),
            6105 => Ok(ErrorCode::CategoryHasChildren),
            6106 => Ok(ErrorCode::CategoryCyclicParent),

            // Variant
            6201 => Ok(ErrorCode::VariantNotFound),
            6202 => Ok(ErrorCode::VariantNameExists),
            6203 => Ok(ErrorCode::InvalidAttribute),

            // Image
            6301 => Ok(ErrorCode::ImageNotFound),
            6302 => Ok(ErrorCode::DuplicatePrimaryImage),
            6303 => Ok(ErrorCode::LastImageRemoval),
            6304 => Ok(ErrorCode::DisplayOrderConflict),
            6305 => Ok(ErrorCode::PrimaryImageRemoval),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::InsufficientStock.code(), 6003);
        assert_eq!(ErrorCode::SkuExists.code(), 6005);

        assert_eq!(ErrorCode::CategoryNotFound.code(), 6101);
        assert_eq!(ErrorCode::CategoryCyclicParent.code(), 6106);

        assert_eq!(ErrorCode::VariantNameExists.code(), 6202);
        assert_eq!(ErrorCode::DuplicatePrimaryImage.code(), 6302);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::StorageError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::ProductNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(6001), Ok(ErrorCode::ProductNotFound));
        assert_eq!(ErrorCode::try_from(6106), Ok(ErrorCode::CategoryCyclicParent));
        assert_eq!(ErrorCode::try_from(6305), Ok(ErrorCode::PrimaryImageRemoval));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(6999), Err(InvalidErrorCode(6999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::ProductNotFound,
            ErrorCode::CategoryCyclicParent,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::ProductNotFound), "6001");
        assert_eq!(ErrorCode::ProductNotFound.message(), "Product not found");
        assert_eq!(
            ErrorCode::InsufficientStock.message(),
            "Insufficient stock"
        );
    }
}
