//! Product catalog engine
//!
//! The catalog domain core: hierarchical categories, the product aggregate
//! (variants and images), and the composable specification engine used for
//! search. Persistence sits behind the [`store`] traits; the bundled
//! [`store::MemoryStore`] interprets specifications in memory.

pub mod catalog;
pub mod config;
pub mod specification;
pub mod store;
pub mod utils;

pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use store::MemoryStore;
