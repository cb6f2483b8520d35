//! Query, pagination and search-criteria types

use crate::models::ProductStatus;
use crate::types::CategoryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hard cap on page size; larger requests are silently clamped
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A resolved sort: concrete field key plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Pagination request: zero-based page index, size clamped to the cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// Build a request, clamping size into `1..=MAX_PAGE_SIZE`.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Index of the first element on this page
    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Wrap a page's content with derived pagination metadata.
    ///
    /// A request built as a struct literal can carry size 0, so the size is
    /// clamped here as well.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: usize) -> Self {
        let size = request.size.max(1);
        let total_pages = total_elements.div_ceil(size);
        Self {
            has_next: request.page + 1 < total_pages,
            has_previous: request.page > 0 && total_elements > 0,
            content,
            page: request.page,
            size,
            total_elements,
            total_pages,
        }
    }

    /// Slice a fully-materialized result set into a single page.
    pub fn from_all(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let content = all
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Self::new(content, request, total)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

// ==================== Search criteria ====================

/// Product search criteria; every field is optional and absent fields
/// contribute no filter clause.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<Decimal>,
    /// Only `Some(true)` contributes a clause (stock > 0); `Some(false)`
    /// and `None` are both "don't care".
    pub in_stock: Option<bool>,
    /// Case-insensitive substring matched against name OR description
    pub search: Option<String>,
    pub sort: Option<String>,
}

/// Category search criteria
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub name: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub is_active: Option<bool>,
    pub sort: Option<String>,
}

/// Variant search criteria
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantFilter {
    pub name: Option<String>,
    pub status: Option<ProductStatus>,
    pub sku: Option<String>,
    pub in_stock: Option<bool>,
    /// attribute name/value pair the variant must carry
    pub attribute: Option<(String, String)>,
    pub sort: Option<String>,
}
