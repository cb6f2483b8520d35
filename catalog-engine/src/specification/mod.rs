//! Composable query specifications
//!
//! The predicate algebra ([`spec`]), the per-entity builders ([`builder`])
//! and the sort-key tables ([`sort`]).

pub mod builder;
pub mod sort;
pub mod spec;

pub use builder::{CategoryField, CategorySpecs, ProductField, ProductSpecs, VariantField, VariantSpecs};
pub use spec::{EntityField, FieldValue, PredicateSpec};
