//! Product aggregate operations
//!
//! Aggregate creation is all-or-nothing: the product, every declared variant
//! and every declared image are validated up front, then handed to the store
//! as one atomic insert. Image mutations that touch several rows (primary
//! reassignment, reorder) go through the store's atomic replacement.

use super::Catalog;
use crate::specification::sort::product_sort;
use crate::specification::ProductSpecs;
use crate::store::CatalogStore;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    ImageCreate, ImageUpdate, Product, ProductCreate, ProductImage, ProductStatus, ProductUpdate,
};
use shared::query::{Page, ProductFilter};
use shared::types::{ImageId, ProductId, now_millis};
use std::collections::HashSet;
use tracing::{debug, info};

impl<S: CatalogStore> Catalog<S> {
    /// Create a product together with its declared variants and images.
    ///
    /// Every child is validated before anything is written; a single invalid
    /// variant or image fails the whole create and leaves no partial
    /// aggregate behind.
    pub fn create_product(&self, payload: &ProductCreate) -> AppResult<Product> {
        self.require_category(payload.category_id)?;

        let product = Product::new(payload)?;
        let variants = self.build_variant_batch(product.id, &payload.variants)?;
        let images = build_image_batch(product.id, &payload.images)?;

        let product = self
            .store
            .insert_product_aggregate(product, variants, images)?;
        info!(id = product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> AppResult<Product> {
        self.require_product(id)
    }

    pub fn update_product(&self, id: ProductId, update: &ProductUpdate) -> AppResult<Product> {
        let mut product = self.require_product(id)?;
        if let Some(category_id) = update.category_id {
            self.require_category(category_id)?;
        }
        product.apply_update(update)?;
        self.store.update_product(product)
    }

    /// Delete a product and, by composition, all of its variants and images.
    pub fn delete_product(&self, id: ProductId) -> AppResult<()> {
        self.store.remove_product(id)?;
        info!(id, "product deleted");
        Ok(())
    }

    /// Apply a stock delta. A delta that would go negative is rejected with
    /// the product unchanged.
    pub fn update_stock(&self, id: ProductId, delta: i64) -> AppResult<Product> {
        let mut product = self.require_product(id)?;
        product.apply_stock_delta(delta)?;
        debug!(id, delta, stock = product.stock_quantity, "stock updated");
        self.store.update_product(product)
    }

    pub fn transition_product_status(
        &self,
        id: ProductId,
        status: ProductStatus,
    ) -> AppResult<Product> {
        let mut product = self.require_product(id)?;
        product.transition_status(status)?;
        self.store.update_product(product)
    }

    /// Sum of variant stock when variants exist, the product's own stock
    /// otherwise.
    pub fn total_stock(&self, id: ProductId) -> AppResult<i64> {
        let product = self.require_product(id)?;
        let variants = self.store.variants_of(id)?;
        Ok(product.total_stock(&variants))
    }

    /// Filtered, sorted, paginated product search.
    pub fn search_products(
        &self,
        filter: &ProductFilter,
        page: usize,
        size: Option<usize>,
    ) -> AppResult<Page<Product>> {
        let spec = ProductSpecs::with_filters(filter);
        let sort = product_sort(filter.sort.as_deref());
        self.store
            .find_products(&spec, &sort, self.page_request(page, size))
    }

    // ==================== Images ====================

    pub fn list_images(&self, product_id: ProductId) -> AppResult<Vec<ProductImage>> {
        self.require_product(product_id)?;
        self.store.images_of(product_id)
    }

    /// Attach an image. A second primary is rejected; demote the current
    /// primary first or use [`Catalog::set_primary_image`]. An unset display
    /// order is assigned past the current maximum.
    pub fn add_image(&self, product_id: ProductId, payload: &ImageCreate) -> AppResult<ProductImage> {
        self.require_product(product_id)?;
        let existing = self.store.images_of(product_id)?;

        let mut image = ProductImage::new(product_id, payload)?;
        if image.is_primary && existing.iter().any(|i| i.is_primary) {
            return Err(AppError::new(ErrorCode::DuplicatePrimaryImage)
                .with_detail("product_id", product_id));
        }
        match payload.display_order {
            Some(order) => {
                if existing.iter().any(|i| i.display_order == order) {
                    return Err(AppError::new(ErrorCode::DisplayOrderConflict)
                        .with_detail("product_id", product_id)
                        .with_detail("display_order", order));
                }
            }
            None => {
                image.display_order =
                    existing.iter().map(|i| i.display_order + 1).max().unwrap_or(0);
            }
        }

        self.store.insert_image(image)
    }

    /// Atomically make `image_id` the product's primary image, clearing the
    /// flag on every other image. This is the only sanctioned way to move
    /// the primary flag.
    pub fn set_primary_image(&self, product_id: ProductId, image_id: ImageId) -> AppResult<()> {
        self.require_product(product_id)?;
        let mut images = self.store.images_of(product_id)?;
        if !images.iter().any(|i| i.id == image_id) {
            return Err(AppError::new(ErrorCode::ImageNotFound)
                .with_detail("id", image_id)
                .with_detail("product_id", product_id));
        }

        let now = now_millis();
        for image in &mut images {
            let primary = image.id == image_id;
            if image.is_primary != primary {
                image.is_primary = primary;
                image.updated_at = now;
            }
        }
        self.store.replace_images(product_id, images)
    }

    /// Reassign display orders 0..n-1 in the given sequence. The id list
    /// must be exactly the product's image set; any foreign, missing or
    /// duplicated id rejects the whole call with nothing reordered.
    pub fn reorder_images(&self, product_id: ProductId, ordered: &[ImageId]) -> AppResult<()> {
        self.require_product(product_id)?;
        let images = self.store.images_of(product_id)?;

        let current: HashSet<ImageId> = images.iter().map(|i| i.id).collect();
        let requested: HashSet<ImageId> = ordered.iter().copied().collect();
        if requested.len() != ordered.len() || requested != current {
            return Err(AppError::invalid_request(
                "reorder list must contain each of the product's image ids exactly once",
            )
            .with_detail("product_id", product_id));
        }

        let now = now_millis();
        let mut by_id: std::collections::HashMap<ImageId, ProductImage> =
            images.into_iter().map(|i| (i.id, i)).collect();
        let mut reordered = Vec::with_capacity(ordered.len());
        for (order, id) in ordered.iter().enumerate() {
            let mut image = by_id.remove(id).ok_or_else(|| {
                AppError::new(ErrorCode::ImageNotFound).with_detail("id", *id)
            })?;
            image.display_order = order as i32;
            image.updated_at = now;
            reordered.push(image);
        }
        self.store.replace_images(product_id, reordered)
    }

    pub fn update_image(
        &self,
        product_id: ProductId,
        image_id: ImageId,
        update: &ImageUpdate,
    ) -> AppResult<ProductImage> {
        let mut image = self.require_image(product_id, image_id)?;
        image.apply_update(update)?;
        self.store.update_image(image)
    }

    /// Remove an image. The primary image cannot be removed while other
    /// images remain (reassign the primary first), and under the
    /// minimum-one-image policy the sole remaining image cannot be removed
    /// at all.
    pub fn delete_image(&self, product_id: ProductId, image_id: ImageId) -> AppResult<()> {
        let image = self.require_image(product_id, image_id)?;
        let count = self.store.images_of(product_id)?.len();

        if self.config.require_product_image && count == 1 {
            return Err(AppError::new(ErrorCode::LastImageRemoval)
                .with_detail("product_id", product_id));
        }
        if image.is_primary && count > 1 {
            return Err(AppError::new(ErrorCode::PrimaryImageRemoval)
                .with_detail("product_id", product_id)
                .with_detail("id", image_id));
        }

        self.store.remove_image(image_id)
    }

    pub(super) fn require_product(&self, id: ProductId) -> AppResult<Product> {
        self.store
            .product(id)?
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("id", id))
    }

    fn require_image(&self, product_id: ProductId, image_id: ImageId) -> AppResult<ProductImage> {
        self.require_product(product_id)?;
        match self.store.image(image_id)? {
            Some(image) if image.product_id == product_id => Ok(image),
            _ => Err(AppError::new(ErrorCode::ImageNotFound)
                .with_detail("id", image_id)
                .with_detail("product_id", product_id)),
        }
    }
}

/// Validate and construct an aggregate's image set: at most one primary,
/// explicit display orders unique, unset orders filled with the lowest free
/// slots in declaration order.
fn build_image_batch(
    product_id: ProductId,
    defs: &[ImageCreate],
) -> AppResult<Vec<ProductImage>> {
    let mut images = Vec::with_capacity(defs.len());
    let mut primary_seen = false;
    let mut used_orders: HashSet<i32> = defs
        .iter()
        .filter_map(|d| d.display_order)
        .collect();

    let explicit: Vec<i32> = defs.iter().filter_map(|d| d.display_order).collect();
    if explicit.len() != used_orders.len() {
        return Err(AppError::new(ErrorCode::DisplayOrderConflict)
            .with_detail("product_id", product_id));
    }

    let mut next_free = 0i32;
    for def in defs {
        let mut image = ProductImage::new(product_id, def)?;
        if image.is_primary {
            if primary_seen {
                return Err(AppError::new(ErrorCode::DuplicatePrimaryImage)
                    .with_detail("product_id", product_id));
            }
            primary_seen = true;
        }
        if def.display_order.is_none() {
            while used_orders.contains(&next_free) {
                next_free += 1;
            }
            image.display_order = next_free;
            used_orders.insert(next_free);
        }
        images.push(image);
    }
    Ok(images)
}
