//! Error handling for the catalog backend
//!
//! - [`ErrorCode`] - unified u16 error codes grouped by numeric range
//! - [`ErrorCategory`] - coarse classification derived from the code range
//! - [`AppError`] / [`AppResult`] - application error type and result alias

pub mod category;
pub mod codes;
pub mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
