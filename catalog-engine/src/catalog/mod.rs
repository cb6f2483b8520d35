//! Catalog services
//!
//! One manager over the storage boundary, with the category, product and
//! variant operations split across the submodules. All aggregate invariants
//! (cycle-free hierarchy, single primary image, unique variant names/SKUs,
//! stock-vs-status consistency) are enforced here; entities carry the local
//! field rules, the stores only persist.

mod category;
mod product;
mod variant;

#[cfg(test)]
mod tests;

use crate::config::CatalogConfig;
use crate::store::CatalogStore;
use shared::query::PageRequest;
use std::sync::Arc;

pub struct Catalog<S: CatalogStore> {
    store: Arc<S>,
    config: CatalogConfig,
}

impl<S: CatalogStore> Catalog<S> {
    pub fn new(store: S, config: CatalogConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, CatalogConfig::default())
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build a page request, applying the configured default and cap.
    fn page_request(&self, page: usize, size: Option<usize>) -> PageRequest {
        let size = size.unwrap_or(self.config.default_page_size);
        PageRequest::new(page, size.min(self.config.max_page_size))
    }
}
