//! Shared types for the catalog backend
//!
//! Common types used across crates: catalog entities, error types,
//! query/pagination structures, and id utilities.

pub mod error;
pub mod models;
pub mod query;
pub mod slug;
pub mod types;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use query::{Page, PageRequest, Sort, SortDirection};
pub use types::{CategoryId, ImageId, ProductId, Timestamp, VariantId};
