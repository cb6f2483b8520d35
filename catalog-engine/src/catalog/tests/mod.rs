use super::*;
use crate::store::MemoryStore;
use rust_decimal::Decimal;
use shared::models::{
    Category, CategoryCreate, ImageCreate, Product, ProductCreate, VariantCreate,
};
use shared::types::{CategoryId, ProductId};

mod test_search;

fn create_test_catalog() -> Catalog<MemoryStore> {
    Catalog::with_defaults(MemoryStore::new())
}

fn create_catalog_with_image_policy() -> Catalog<MemoryStore> {
    Catalog::new(
        MemoryStore::new(),
        CatalogConfig {
            require_product_image: true,
            ..Default::default()
        },
    )
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// ========================================================================
// Helpers: seed entities
// ========================================================================

fn seed_category(
    catalog: &Catalog<MemoryStore>,
    name: &str,
    parent_id: Option<CategoryId>,
) -> Category {
    catalog
        .create_category(&CategoryCreate {
            name: name.to_string(),
            parent_id,
            ..Default::default()
        })
        .unwrap()
}

fn product_payload(name: &str, category_id: CategoryId, price: &str, stock: i64) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        category_id,
        price: dec(price),
        stock_quantity: Some(stock),
        ..Default::default()
    }
}

fn seed_product(
    catalog: &Catalog<MemoryStore>,
    name: &str,
    category_id: CategoryId,
    price: &str,
    stock: i64,
) -> Product {
    catalog
        .create_product(&product_payload(name, category_id, price, stock))
        .unwrap()
}

fn variant_payload(name: &str, stock: i64) -> VariantCreate {
    VariantCreate {
        name: name.to_string(),
        stock_quantity: Some(stock),
        ..Default::default()
    }
}

fn image_payload(url: &str, primary: bool, order: Option<i32>) -> ImageCreate {
    ImageCreate {
        url: url.to_string(),
        is_primary: Some(primary),
        display_order: order,
        ..Default::default()
    }
}

/// Count of primary images for a product; the single-primary invariant says
/// this is 0 (no images) or 1.
fn primary_count(catalog: &Catalog<MemoryStore>, product_id: ProductId) -> usize {
    catalog
        .list_images(product_id)
        .unwrap()
        .iter()
        .filter(|i| i.is_primary)
        .count()
}
