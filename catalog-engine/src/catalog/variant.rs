//! Product variant operations
//!
//! Uniqueness rules live here: variant names are unique per product
//! (case-insensitive) and SKUs are unique across all variants. Both probes
//! use exclude-self semantics so updating a variant to its own current value
//! is never flagged as a duplicate.

use super::Catalog;
use crate::specification::sort::variant_sort;
use crate::specification::VariantSpecs;
use crate::store::CatalogStore;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{ProductStatus, ProductVariant, VariantCreate, VariantUpdate};
use shared::query::{Page, VariantFilter};
use shared::types::{ProductId, VariantId};
use std::collections::HashSet;
use tracing::info;

impl<S: CatalogStore> Catalog<S> {
    /// Create a single variant for an existing product.
    pub fn create_variant(
        &self,
        product_id: ProductId,
        payload: &VariantCreate,
    ) -> AppResult<ProductVariant> {
        self.require_product(product_id)?;
        let variants = self.build_variant_batch(product_id, std::slice::from_ref(payload))?;
        let variant = self.store.insert_variant(
            variants
                .into_iter()
                .next()
                .ok_or_else(|| AppError::internal("empty variant batch"))?,
        )?;
        info!(id = variant.id, product_id, name = %variant.name, "variant created");
        Ok(variant)
    }

    /// Create a batch of variants. The whole batch is validated before any
    /// variant is persisted; one invalid or duplicate definition fails all
    /// of them.
    pub fn create_variants(
        &self,
        product_id: ProductId,
        payloads: &[VariantCreate],
    ) -> AppResult<Vec<ProductVariant>> {
        self.require_product(product_id)?;
        let variants = self.build_variant_batch(product_id, payloads)?;
        self.store.insert_variants(variants)
    }

    pub fn get_variant(&self, id: VariantId) -> AppResult<ProductVariant> {
        self.require_variant(id)
    }

    pub fn list_variants(&self, product_id: ProductId) -> AppResult<Vec<ProductVariant>> {
        self.require_product(product_id)?;
        self.store.variants_of(product_id)
    }

    pub fn update_variant(&self, id: VariantId, update: &VariantUpdate) -> AppResult<ProductVariant> {
        let mut variant = self.require_variant(id)?;
        variant.apply_update(update)?;

        if self
            .store
            .variant_name_exists(variant.product_id, &variant.name, Some(id))?
        {
            return Err(AppError::new(ErrorCode::VariantNameExists)
                .with_detail("product_id", variant.product_id)
                .with_detail("name", variant.name.as_str()));
        }
        if let Some(sku) = variant.sku.as_deref()
            && self.store.sku_exists(sku, Some(id))?
        {
            return Err(AppError::new(ErrorCode::SkuExists).with_detail("sku", sku));
        }

        self.store.update_variant(variant)
    }

    pub fn delete_variant(&self, id: VariantId) -> AppResult<()> {
        self.store.remove_variant(id)
    }

    /// Apply a stock delta with the product's rules: never negative, status
    /// kept consistent at the zero boundary.
    pub fn update_variant_stock(&self, id: VariantId, delta: i64) -> AppResult<ProductVariant> {
        let mut variant = self.require_variant(id)?;
        variant.apply_stock_delta(delta)?;
        self.store.update_variant(variant)
    }

    pub fn transition_variant_status(
        &self,
        id: VariantId,
        status: ProductStatus,
    ) -> AppResult<ProductVariant> {
        let mut variant = self.require_variant(id)?;
        variant.transition_status(status)?;
        self.store.update_variant(variant)
    }

    /// Insert or overwrite one attribute (last write wins).
    pub fn add_attribute(
        &self,
        id: VariantId,
        name: &str,
        value: &str,
    ) -> AppResult<ProductVariant> {
        let mut variant = self.require_variant(id)?;
        variant.set_attribute(name, value)?;
        self.store.update_variant(variant)
    }

    pub fn remove_attribute(&self, id: VariantId, name: &str) -> AppResult<ProductVariant> {
        let mut variant = self.require_variant(id)?;
        variant.remove_attribute(name);
        self.store.update_variant(variant)
    }

    /// Filtered, sorted, paginated variant search, optionally scoped to one
    /// product.
    pub fn search_variants(
        &self,
        product_id: Option<ProductId>,
        filter: &VariantFilter,
        page: usize,
        size: Option<usize>,
    ) -> AppResult<Page<ProductVariant>> {
        let mut spec = VariantSpecs::with_filters(filter);
        if let Some(product_id) = product_id {
            self.require_product(product_id)?;
            spec = spec.and(VariantSpecs::by_product(product_id));
        }
        let sort = variant_sort(filter.sort.as_deref());
        self.store
            .find_variants(&spec, &sort, self.page_request(page, size))
    }

    /// Validate and construct a variant batch against both the persisted set
    /// and the batch itself. Nothing is written here.
    pub(super) fn build_variant_batch(
        &self,
        product_id: ProductId,
        payloads: &[VariantCreate],
    ) -> AppResult<Vec<ProductVariant>> {
        let mut variants = Vec::with_capacity(payloads.len());
        let mut batch_names: HashSet<String> = HashSet::new();
        let mut batch_skus: HashSet<String> = HashSet::new();

        for payload in payloads {
            let variant = ProductVariant::new(product_id, payload)?;

            let name_key = variant.name.to_lowercase();
            if !batch_names.insert(name_key)
                || self
                    .store
                    .variant_name_exists(product_id, &variant.name, None)?
            {
                return Err(AppError::new(ErrorCode::VariantNameExists)
                    .with_detail("product_id", product_id)
                    .with_detail("name", variant.name.as_str()));
            }

            if let Some(sku) = variant.sku.as_deref() {
                if !batch_skus.insert(sku.to_string()) || self.store.sku_exists(sku, None)? {
                    return Err(AppError::new(ErrorCode::SkuExists).with_detail("sku", sku));
                }
            }

            variants.push(variant);
        }
        Ok(variants)
    }

    fn require_variant(&self, id: VariantId) -> AppResult<ProductVariant> {
        self.store
            .variant(id)?
            .ok_or_else(|| AppError::new(ErrorCode::VariantNotFound).with_detail("id", id))
    }
}
