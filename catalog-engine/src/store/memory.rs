//! In-memory store
//!
//! Arena-style maps behind `parking_lot::RwLock`, one per entity. Specs are
//! interpreted directly via [`PredicateSpec::matches`]; multi-row operations
//! take a single write lock so they are atomic with respect to readers.

use super::{CategoryStore, ImageStore, ProductStore, VariantStore};
use crate::specification::{CategoryField, PredicateSpec, ProductField, VariantField};
use crate::specification::sort::{sort_categories, sort_products, sort_variants};
use parking_lot::RwLock;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, Product, ProductImage, ProductVariant};
use shared::query::{Page, PageRequest, Sort};
use shared::types::{CategoryId, ImageId, ProductId, VariantId};
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryStore {
    categories: RwLock<HashMap<CategoryId, Category>>,
    products: RwLock<HashMap<ProductId, Product>>,
    variants: RwLock<HashMap<VariantId, ProductVariant>>,
    images: RwLock<HashMap<ImageId, ProductImage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CategoryStore for MemoryStore {
    fn insert_category(&self, category: Category) -> AppResult<Category> {
        self.categories
            .write()
            .insert(category.id, category.clone());
        Ok(category)
    }

    fn update_category(&self, category: Category) -> AppResult<Category> {
        let mut map = self.categories.write();
        if !map.contains_key(&category.id) {
            return Err(AppError::new(ErrorCode::CategoryNotFound).with_detail("id", category.id));
        }
        map.insert(category.id, category.clone());
        Ok(category)
    }

    fn remove_category(&self, id: CategoryId) -> AppResult<()> {
        if self.categories.write().remove(&id).is_none() {
            return Err(AppError::new(ErrorCode::CategoryNotFound).with_detail("id", id));
        }
        Ok(())
    }

    fn category(&self, id: CategoryId) -> AppResult<Option<Category>> {
        Ok(self.categories.read().get(&id).cloned())
    }

    fn category_name_exists(&self, name: &str, exclude: Option<CategoryId>) -> AppResult<bool> {
        let needle = name.trim().to_lowercase();
        Ok(self.categories.read().values().any(|c| {
            Some(c.id) != exclude && c.name.to_lowercase() == needle
        }))
    }

    fn category_slug_exists(&self, slug: &str, exclude: Option<CategoryId>) -> AppResult<bool> {
        Ok(self
            .categories
            .read()
            .values()
            .any(|c| Some(c.id) != exclude && c.slug == slug))
    }

    fn children_of(&self, parent_id: Option<CategoryId>) -> AppResult<Vec<Category>> {
        Ok(self
            .categories
            .read()
            .values()
            .filter(|c| c.parent_id == parent_id)
            .cloned()
            .collect())
    }

    fn count_children(&self, id: CategoryId) -> AppResult<usize> {
        Ok(self
            .categories
            .read()
            .values()
            .filter(|c| c.parent_id == Some(id))
            .count())
    }

    fn find_categories(
        &self,
        spec: &PredicateSpec<CategoryField>,
        sort: &Sort,
        page: PageRequest,
    ) -> AppResult<Page<Category>> {
        let mut matched: Vec<Category> = self
            .categories
            .read()
            .values()
            .filter(|c| spec.matches(c))
            .cloned()
            .collect();
        sort_categories(&mut matched, sort);
        Ok(Page::from_all(matched, page))
    }
}

impl ProductStore for MemoryStore {
    fn insert_product(&self, product: Product) -> AppResult<Product> {
        self.products.write().insert(product.id, product.clone());
        Ok(product)
    }

    fn insert_product_aggregate(
        &self,
        product: Product,
        variants: Vec<ProductVariant>,
        images: Vec<ProductImage>,
    ) -> AppResult<Product> {
        // Take all three write locks for the duration so no reader observes
        // the product without its children.
        let mut products = self.products.write();
        let mut variant_map = self.variants.write();
        let mut image_map = self.images.write();

        products.insert(product.id, product.clone());
        for v in variants {
            variant_map.insert(v.id, v);
        }
        for i in images {
            image_map.insert(i.id, i);
        }
        Ok(product)
    }

    fn update_product(&self, product: Product) -> AppResult<Product> {
        let mut map = self.products.write();
        if !map.contains_key(&product.id) {
            return Err(AppError::new(ErrorCode::ProductNotFound).with_detail("id", product.id));
        }
        map.insert(product.id, product.clone());
        Ok(product)
    }

    fn remove_product(&self, id: ProductId) -> AppResult<()> {
        let mut products = self.products.write();
        let mut variants = self.variants.write();
        let mut images = self.images.write();

        if products.remove(&id).is_none() {
            return Err(AppError::new(ErrorCode::ProductNotFound).with_detail("id", id));
        }
        variants.retain(|_, v| v.product_id != id);
        images.retain(|_, i| i.product_id != id);
        Ok(())
    }

    fn product(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.products.read().get(&id).cloned())
    }

    fn count_products_in_category(&self, category_id: CategoryId) -> AppResult<usize> {
        Ok(self
            .products
            .read()
            .values()
            .filter(|p| p.category_id == category_id)
            .count())
    }

    fn find_products(
        &self,
        spec: &PredicateSpec<ProductField>,
        sort: &Sort,
        page: PageRequest,
    ) -> AppResult<Page<Product>> {
        let mut matched: Vec<Product> = self
            .products
            .read()
            .values()
            .filter(|p| spec.matches(p))
            .cloned()
            .collect();
        sort_products(&mut matched, sort);
        Ok(Page::from_all(matched, page))
    }
}

impl VariantStore for MemoryStore {
    fn insert_variant(&self, variant: ProductVariant) -> AppResult<ProductVariant> {
        self.variants.write().insert(variant.id, variant.clone());
        Ok(variant)
    }

    fn insert_variants(&self, variants: Vec<ProductVariant>) -> AppResult<Vec<ProductVariant>> {
        let mut map = self.variants.write();
        for v in &variants {
            map.insert(v.id, v.clone());
        }
        Ok(variants)
    }

    fn update_variant(&self, variant: ProductVariant) -> AppResult<ProductVariant> {
        let mut map = self.variants.write();
        if !map.contains_key(&variant.id) {
            return Err(AppError::new(ErrorCode::VariantNotFound).with_detail("id", variant.id));
        }
        map.insert(variant.id, variant.clone());
        Ok(variant)
    }

    fn remove_variant(&self, id: VariantId) -> AppResult<()> {
        if self.variants.write().remove(&id).is_none() {
            return Err(AppError::new(ErrorCode::VariantNotFound).with_detail("id", id));
        }
        Ok(())
    }

    fn variant(&self, id: VariantId) -> AppResult<Option<ProductVariant>> {
        Ok(self.variants.read().get(&id).cloned())
    }

    fn variants_of(&self, product_id: ProductId) -> AppResult<Vec<ProductVariant>> {
        let mut list: Vec<ProductVariant> = self
            .variants
            .read()
            .values()
            .filter(|v| v.product_id == product_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(list)
    }

    fn variant_name_exists(
        &self,
        product_id: ProductId,
        name: &str,
        exclude: Option<VariantId>,
    ) -> AppResult<bool> {
        let needle = name.trim().to_lowercase();
        Ok(self.variants.read().values().any(|v| {
            v.product_id == product_id
                && Some(v.id) != exclude
                && v.name.to_lowercase() == needle
        }))
    }

    fn sku_exists(&self, sku: &str, exclude: Option<VariantId>) -> AppResult<bool> {
        Ok(self
            .variants
            .read()
            .values()
            .any(|v| Some(v.id) != exclude && v.sku.as_deref() == Some(sku)))
    }

    fn find_variants(
        &self,
        spec: &PredicateSpec<VariantField>,
        sort: &Sort,
        page: PageRequest,
    ) -> AppResult<Page<ProductVariant>> {
        let mut matched: Vec<ProductVariant> = self
            .variants
            .read()
            .values()
            .filter(|v| spec.matches(v))
            .cloned()
            .collect();
        sort_variants(&mut matched, sort);
        Ok(Page::from_all(matched, page))
    }
}

impl ImageStore for MemoryStore {
    fn insert_image(&self, image: ProductImage) -> AppResult<ProductImage> {
        self.images.write().insert(image.id, image.clone());
        Ok(image)
    }

    fn update_image(&self, image: ProductImage) -> AppResult<ProductImage> {
        let mut map = self.images.write();
        if !map.contains_key(&image.id) {
            return Err(AppError::new(ErrorCode::ImageNotFound).with_detail("id", image.id));
        }
        map.insert(image.id, image.clone());
        Ok(image)
    }

    fn remove_image(&self, id: ImageId) -> AppResult<()> {
        if self.images.write().remove(&id).is_none() {
            return Err(AppError::new(ErrorCode::ImageNotFound).with_detail("id", id));
        }
        Ok(())
    }

    fn image(&self, id: ImageId) -> AppResult<Option<ProductImage>> {
        Ok(self.images.read().get(&id).cloned())
    }

    fn images_of(&self, product_id: ProductId) -> AppResult<Vec<ProductImage>> {
        let mut list: Vec<ProductImage> = self
            .images
            .read()
            .values()
            .filter(|i| i.product_id == product_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(list)
    }

    fn replace_images(&self, product_id: ProductId, images: Vec<ProductImage>) -> AppResult<()> {
        let mut map = self.images.write();
        map.retain(|_, i| i.product_id != product_id);
        for i in images {
            map.insert(i.id, i);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CategoryCreate, ProductCreate};

    fn category(name: &str) -> Category {
        Category::new(&CategoryCreate {
            name: name.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn product(name: &str, category_id: CategoryId) -> Product {
        Product::new(&ProductCreate {
            name: name.to_string(),
            category_id,
            price: "9.99".parse().unwrap(),
            stock_quantity: Some(1),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_category_round_trip() {
        let store = MemoryStore::new();
        let c = store.insert_category(category("Electronics")).unwrap();
        assert_eq!(store.category(c.id).unwrap().unwrap().name, "Electronics");

        store.remove_category(c.id).unwrap();
        assert!(store.category(c.id).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_category_fails() {
        let store = MemoryStore::new();
        let err = store.update_category(category("x")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[test]
    fn test_name_probe_excludes_self() {
        let store = MemoryStore::new();
        let c = store.insert_category(category("Phones")).unwrap();

        assert!(store.category_name_exists("phones", None).unwrap());
        assert!(!store.category_name_exists("phones", Some(c.id)).unwrap());
    }

    #[test]
    fn test_remove_product_cascades() {
        let store = MemoryStore::new();
        let p = store.insert_product(product("Widget", 1)).unwrap();
        let v = ProductVariant::new(
            p.id,
            &shared::models::VariantCreate {
                name: "Red".to_string(),
                stock_quantity: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        store.insert_variant(v.clone()).unwrap();

        store.remove_product(p.id).unwrap();
        assert!(store.variant(v.id).unwrap().is_none());
    }

    #[test]
    fn test_images_of_ordered_by_display_order() {
        let store = MemoryStore::new();
        for order in [2, 0, 1] {
            let img = ProductImage::new(
                5,
                &shared::models::ImageCreate {
                    url: format!("https://cdn.example.com/{order}.jpg"),
                    display_order: Some(order),
                    ..Default::default()
                },
            )
            .unwrap();
            store.insert_image(img).unwrap();
        }
        let orders: Vec<i32> = store
            .images_of(5)
            .unwrap()
            .iter()
            .map(|i| i.display_order)
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }
}
