//! Category hierarchy operations

use super::Catalog;
use crate::specification::sort::category_sort;
use crate::specification::CategorySpecs;
use crate::store::CatalogStore;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryNode, CategoryUpdate};
use shared::query::{CategoryFilter, Page, Sort};
use shared::types::{CategoryId, now_millis};
use tracing::{debug, info};

impl<S: CatalogStore> Catalog<S> {
    /// Create a category, deriving its slug and validating name/slug
    /// uniqueness. An explicit parent must exist.
    pub fn create_category(&self, payload: &CategoryCreate) -> AppResult<Category> {
        if let Some(parent_id) = payload.parent_id {
            self.require_category(parent_id)?;
        }

        let category = Category::new(payload)?;
        if self.store.category_name_exists(&category.name, None)? {
            return Err(AppError::new(ErrorCode::CategoryNameExists)
                .with_detail("name", category.name.as_str()));
        }
        if self.store.category_slug_exists(&category.slug, None)? {
            return Err(AppError::new(ErrorCode::CategorySlugExists)
                .with_detail("slug", category.slug.as_str()));
        }

        let category = self.store.insert_category(category)?;
        info!(id = category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub fn get_category(&self, id: CategoryId) -> AppResult<Category> {
        self.require_category(id)
    }

    /// Update name/slug/description/flags. Re-parenting goes through
    /// [`Catalog::change_parent`].
    pub fn update_category(&self, id: CategoryId, update: &CategoryUpdate) -> AppResult<Category> {
        let mut category = self.require_category(id)?;
        category.apply_update(update)?;

        if self.store.category_name_exists(&category.name, Some(id))? {
            return Err(AppError::new(ErrorCode::CategoryNameExists)
                .with_detail("name", category.name.as_str()));
        }
        if self.store.category_slug_exists(&category.slug, Some(id))? {
            return Err(AppError::new(ErrorCode::CategorySlugExists)
                .with_detail("slug", category.slug.as_str()));
        }

        self.store.update_category(category)
    }

    /// Move a category under a new parent (or to the root with `None`).
    ///
    /// Rejected when the candidate parent is the category itself or any of
    /// its descendants; the check walks the ancestor chain of the candidate
    /// by id, so a reference cycle can never be written.
    pub fn change_parent(
        &self,
        id: CategoryId,
        new_parent: Option<CategoryId>,
    ) -> AppResult<Category> {
        let mut category = self.require_category(id)?;

        if let Some(parent_id) = new_parent {
            if parent_id == id {
                return Err(AppError::new(ErrorCode::CategoryCyclicParent)
                    .with_detail("id", id)
                    .with_detail("parent_id", parent_id));
            }
            self.require_category(parent_id)?;

            // Walk from the candidate parent up to the root.
            let mut cursor = Some(parent_id);
            while let Some(current) = cursor {
                if current == id {
                    return Err(AppError::new(ErrorCode::CategoryCyclicParent)
                        .with_detail("id", id)
                        .with_detail("parent_id", parent_id));
                }
                cursor = self
                    .store
                    .category(current)?
                    .and_then(|c| c.parent_id);
            }
        }

        category.parent_id = new_parent;
        category.updated_at = now_millis();
        let category = self.store.update_category(category)?;
        debug!(id, ?new_parent, "category re-parented");
        Ok(category)
    }

    /// Delete a category. Refused while it still has subcategories or
    /// products.
    pub fn delete_category(&self, id: CategoryId) -> AppResult<()> {
        self.require_category(id)?;

        let children = self.store.count_children(id)?;
        if children > 0 {
            return Err(AppError::new(ErrorCode::CategoryHasChildren)
                .with_detail("id", id)
                .with_detail("children", children as i64));
        }
        let products = self.store.count_products_in_category(id)?;
        if products > 0 {
            return Err(AppError::new(ErrorCode::CategoryHasProducts)
                .with_detail("id", id)
                .with_detail("products", products as i64));
        }

        self.store.remove_category(id)?;
        info!(id, "category deleted");
        Ok(())
    }

    /// Paginated hierarchical browsing: the children of `parent_id` (roots
    /// for `None`), name ascending, each with one level of its own children
    /// materialized.
    pub fn tree_by_parent(
        &self,
        parent_id: Option<CategoryId>,
        page: usize,
        size: Option<usize>,
    ) -> AppResult<Page<CategoryNode>> {
        if let Some(parent_id) = parent_id {
            self.require_category(parent_id)?;
        }

        let mut level = self.store.children_of(parent_id)?;
        crate::specification::sort::sort_categories(&mut level, &Sort::asc("name"));

        let page = Page::from_all(level, self.page_request(page, size));
        let mut nodes = Vec::with_capacity(page.content.len());
        for category in &page.content {
            let mut children = self.store.children_of(Some(category.id))?;
            crate::specification::sort::sort_categories(&mut children, &Sort::asc("name"));
            nodes.push(children);
        }
        let mut children = nodes.into_iter();
        Ok(page.map(|category| CategoryNode {
            category,
            children: children.next().unwrap_or_default(),
        }))
    }

    /// Filtered, sorted, paginated category search.
    pub fn search_categories(
        &self,
        filter: &CategoryFilter,
        page: usize,
        size: Option<usize>,
    ) -> AppResult<Page<Category>> {
        let spec = CategorySpecs::with_filters(filter);
        let sort = category_sort(filter.sort.as_deref());
        self.store
            .find_categories(&spec, &sort, self.page_request(page, size))
    }

    pub(super) fn require_category(&self, id: CategoryId) -> AppResult<Category> {
        self.store
            .category(id)?
            .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound).with_detail("id", id))
    }
}
