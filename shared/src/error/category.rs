//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the code range:
/// - 0xxx: General errors
/// - 60xx: Product errors
/// - 61xx: Category errors
/// - 62xx: Variant errors
/// - 63xx: Image errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Product errors (60xx)
    Product,
    /// Category errors (61xx)
    Category,
    /// Variant errors (62xx)
    Variant,
    /// Image errors (63xx)
    Image,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            6000..6100 => Self::Product,
            6100..6200 => Self::Category,
            6200..6300 => Self::Variant,
            6300..6400 => Self::Image,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Product => "product",
            Self::Category => "category",
            Self::Variant => "variant",
            Self::Image => "image",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
