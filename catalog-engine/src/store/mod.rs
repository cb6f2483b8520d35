//! Storage boundary
//!
//! Narrow per-entity traits the catalog services talk through. A backing
//! store interprets the specification output however it likes (in memory,
//! or compiled into a native query); atomicity of multi-row operations
//! (aggregate insert, image replacement) lives behind this boundary.

mod memory;

pub use memory::MemoryStore;

use crate::specification::{CategoryField, PredicateSpec, ProductField, VariantField};
use shared::error::AppResult;
use shared::models::{Category, Product, ProductImage, ProductVariant};
use shared::query::{Page, PageRequest, Sort};
use shared::types::{CategoryId, ImageId, ProductId, VariantId};

pub trait CategoryStore {
    fn insert_category(&self, category: Category) -> AppResult<Category>;
    fn update_category(&self, category: Category) -> AppResult<Category>;
    fn remove_category(&self, id: CategoryId) -> AppResult<()>;
    fn category(&self, id: CategoryId) -> AppResult<Option<Category>>;

    /// Uniqueness probes with exclude-self semantics: `exclude` is the id of
    /// the entity being updated, so its own current value never counts as a
    /// duplicate of itself.
    fn category_name_exists(&self, name: &str, exclude: Option<CategoryId>) -> AppResult<bool>;
    fn category_slug_exists(&self, slug: &str, exclude: Option<CategoryId>) -> AppResult<bool>;

    /// Direct children; `None` lists the roots
    fn children_of(&self, parent_id: Option<CategoryId>) -> AppResult<Vec<Category>>;
    fn count_children(&self, id: CategoryId) -> AppResult<usize>;

    fn find_categories(
        &self,
        spec: &PredicateSpec<CategoryField>,
        sort: &Sort,
        page: PageRequest,
    ) -> AppResult<Page<Category>>;
}

pub trait ProductStore {
    fn insert_product(&self, product: Product) -> AppResult<Product>;

    /// Insert a product together with its variants and images as one atomic
    /// operation: either everything lands or nothing does.
    fn insert_product_aggregate(
        &self,
        product: Product,
        variants: Vec<ProductVariant>,
        images: Vec<ProductImage>,
    ) -> AppResult<Product>;

    fn update_product(&self, product: Product) -> AppResult<Product>;

    /// Remove a product and, by composition, its owned variants and images
    fn remove_product(&self, id: ProductId) -> AppResult<()>;
    fn product(&self, id: ProductId) -> AppResult<Option<Product>>;

    fn count_products_in_category(&self, category_id: CategoryId) -> AppResult<usize>;

    fn find_products(
        &self,
        spec: &PredicateSpec<ProductField>,
        sort: &Sort,
        page: PageRequest,
    ) -> AppResult<Page<Product>>;
}

pub trait VariantStore {
    fn insert_variant(&self, variant: ProductVariant) -> AppResult<ProductVariant>;

    /// All-or-nothing batch insert
    fn insert_variants(&self, variants: Vec<ProductVariant>) -> AppResult<Vec<ProductVariant>>;

    fn update_variant(&self, variant: ProductVariant) -> AppResult<ProductVariant>;
    fn remove_variant(&self, id: VariantId) -> AppResult<()>;
    fn variant(&self, id: VariantId) -> AppResult<Option<ProductVariant>>;
    fn variants_of(&self, product_id: ProductId) -> AppResult<Vec<ProductVariant>>;

    /// Case-insensitive per-product name probe, exclude-self semantics
    fn variant_name_exists(
        &self,
        product_id: ProductId,
        name: &str,
        exclude: Option<VariantId>,
    ) -> AppResult<bool>;

    /// Global SKU probe, exclude-self semantics
    fn sku_exists(&self, sku: &str, exclude: Option<VariantId>) -> AppResult<bool>;

    fn find_variants(
        &self,
        spec: &PredicateSpec<VariantField>,
        sort: &Sort,
        page: PageRequest,
    ) -> AppResult<Page<ProductVariant>>;
}

pub trait ImageStore {
    fn insert_image(&self, image: ProductImage) -> AppResult<ProductImage>;
    fn update_image(&self, image: ProductImage) -> AppResult<ProductImage>;
    fn remove_image(&self, id: ImageId) -> AppResult<()>;
    fn image(&self, id: ImageId) -> AppResult<Option<ProductImage>>;

    /// A product's images, ordered by display order then id
    fn images_of(&self, product_id: ProductId) -> AppResult<Vec<ProductImage>>;

    /// Atomically replace a product's whole image set. Used by reorder and
    /// primary-flag changes, which touch several rows and must not be
    /// observable half-applied.
    fn replace_images(&self, product_id: ProductId, images: Vec<ProductImage>) -> AppResult<()>;
}

/// The full storage surface the catalog services need.
pub trait CatalogStore: CategoryStore + ProductStore + VariantStore + ImageStore {}

impl<S: CategoryStore + ProductStore + VariantStore + ImageStore> CatalogStore for S {}
