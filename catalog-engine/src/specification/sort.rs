//! Sort-key resolution and in-memory comparators
//!
//! Sorting is a separate concern from filtering: callers pass a string key,
//! the per-entity lookup table maps it to a concrete field and direction,
//! and unknown keys fall back to the entity's default (name ascending).

use shared::models::{Category, Product, ProductVariant};
use shared::query::{Sort, SortDirection};
use std::cmp::Ordering;

/// Resolve a product sort key. Recency keys default to descending.
pub fn product_sort(key: Option<&str>) -> Sort {
    match key.map(str::trim) {
        Some("price") => Sort::asc("price"),
        Some("stock") => Sort::asc("stock_quantity"),
        Some("rating") => Sort::desc("rating"),
        Some("created") => Sort::desc("created_at"),
        Some("updated") => Sort::desc("updated_at"),
        _ => Sort::asc("name"),
    }
}

/// Resolve a category sort key.
pub fn category_sort(key: Option<&str>) -> Sort {
    match key.map(str::trim) {
        Some("sort_order") => Sort::asc("sort_order"),
        Some("created") => Sort::desc("created_at"),
        _ => Sort::asc("name"),
    }
}

/// Resolve a variant sort key.
pub fn variant_sort(key: Option<&str>) -> Sort {
    match key.map(str::trim) {
        Some("price") => Sort::asc("price_override"),
        Some("stock") => Sort::asc("stock_quantity"),
        Some("created") => Sort::desc("created_at"),
        _ => Sort::asc("name"),
    }
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Case-insensitive name ordering, the shared default.
fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn sort_products(items: &mut [Product], sort: &Sort) {
    items.sort_by(|a, b| {
        let ord = match sort.field.as_str() {
            "price" => a.price.cmp(&b.price),
            "stock_quantity" => a.stock_quantity.cmp(&b.stock_quantity),
            // absent ratings sort last regardless of direction
            "rating" => match (a.rating, b.rating) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            "created_at" => a.created_at.cmp(&b.created_at),
            "updated_at" => a.updated_at.cmp(&b.updated_at),
            _ => by_name(&a.name, &b.name),
        };
        directed(ord, sort.direction).then_with(|| a.id.cmp(&b.id))
    });
}

pub fn sort_categories(items: &mut [Category], sort: &Sort) {
    items.sort_by(|a, b| {
        let ord = match sort.field.as_str() {
            "sort_order" => a.sort_order.cmp(&b.sort_order),
            "created_at" => a.created_at.cmp(&b.created_at),
            _ => by_name(&a.name, &b.name),
        };
        directed(ord, sort.direction).then_with(|| a.id.cmp(&b.id))
    });
}

pub fn sort_variants(items: &mut [ProductVariant], sort: &Sort) {
    items.sort_by(|a, b| {
        let ord = match sort.field.as_str() {
            "price_override" => a.price_override.cmp(&b.price_override),
            "stock_quantity" => a.stock_quantity.cmp(&b.stock_quantity),
            "created_at" => a.created_at.cmp(&b.created_at),
            _ => by_name(&a.name, &b.name),
        };
        directed(ord, sort.direction).then_with(|| a.id.cmp(&b.id))
    });
}
