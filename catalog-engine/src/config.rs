//! Engine configuration
//!
//! All settings carry defaults and can be overridden through environment
//! variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | CATALOG_MAX_PAGE_SIZE | 100 | Hard cap on page size |
//! | CATALOG_DEFAULT_PAGE_SIZE | 20 | Page size when none requested |
//! | CATALOG_REQUIRE_PRODUCT_IMAGE | false | Forbid removing a product's last image |

use shared::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use std::env;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Hard cap applied to every page request
    pub max_page_size: usize,
    /// Page size used when the caller does not supply one
    pub default_page_size: usize,
    /// Minimum-one-image policy: when set, deleting a product's sole
    /// remaining image is rejected
    pub require_product_image: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
            require_product_image: false,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_page_size: env_usize("CATALOG_MAX_PAGE_SIZE", defaults.max_page_size)
                .clamp(1, MAX_PAGE_SIZE),
            default_page_size: env_usize("CATALOG_DEFAULT_PAGE_SIZE", defaults.default_page_size)
                .clamp(1, MAX_PAGE_SIZE),
            require_product_image: env_bool(
                "CATALOG_REQUIRE_PRODUCT_IMAGE",
                defaults.require_product_image,
            ),
        }
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.default_page_size, 20);
        assert!(!config.require_product_image);
    }

    #[test]
    fn test_env_bool_parsing() {
        assert!(!env_bool("CATALOG_TEST_UNSET_FLAG", false));
        assert!(env_bool("CATALOG_TEST_UNSET_FLAG", true));
    }
}
