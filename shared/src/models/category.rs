//! Category Model

use crate::error::{AppError, AppResult, ErrorCode};
use crate::slug::{is_valid_slug, slugify};
use crate::types::{CategoryId, Timestamp, next_id, now_millis};
use crate::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SLUG_LEN, validate_optional_text,
    validate_required_text,
};
use serde::{Deserialize, Serialize};

/// Category entity
///
/// Self-referencing tree node. Only the child->parent pointer is stored;
/// children are derived by lookup so the two directions can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Unique among all categories
    pub name: String,
    /// Unique, lowercase/hyphenated; derived from name unless supplied
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    /// Build a validated category from a create payload, deriving the slug
    /// from the name when none is supplied.
    pub fn new(payload: &CategoryCreate) -> AppResult<Self> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(payload.description.as_deref(), "description", MAX_DESCRIPTION_LEN)?;

        let slug = Self::resolve_slug(&payload.name, payload.slug.as_deref())?;

        let now = now_millis();
        Ok(Self {
            id: next_id(),
            name: payload.name.trim().to_string(),
            slug,
            description: payload.description.clone(),
            parent_id: payload.parent_id,
            is_active: payload.is_active.unwrap_or(true),
            sort_order: payload.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply an update payload. Renaming regenerates the slug unless the
    /// caller supplied an explicit slug in the same update. Parent changes go
    /// through the service layer where the cycle check lives, not here.
    pub fn apply_update(&mut self, update: &CategoryUpdate) -> AppResult<()> {
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(update.description.as_deref(), "description", MAX_DESCRIPTION_LEN)?;

        match (&update.name, &update.slug) {
            (Some(name), slug) => {
                self.slug = Self::resolve_slug(name, slug.as_deref())?;
                self.name = name.trim().to_string();
            }
            (None, Some(slug)) => {
                self.slug = Self::resolve_slug(&self.name, Some(slug))?;
            }
            (None, None) => {}
        }

        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(sort_order) = update.sort_order {
            self.sort_order = sort_order;
        }
        self.updated_at = now_millis();
        Ok(())
    }

    /// Use the explicit slug when given (validating its shape), otherwise
    /// derive one from the name.
    fn resolve_slug(name: &str, explicit: Option<&str>) -> AppResult<String> {
        let slug = match explicit {
            Some(s) => {
                if !is_valid_slug(s) {
                    return Err(AppError::with_message(
                        ErrorCode::InvalidFormat,
                        "slug must be lowercase alphanumeric segments separated by hyphens",
                    )
                    .with_detail("field", "slug")
                    .with_detail("value", s));
                }
                s.to_string()
            }
            None => {
                let derived = slugify(name);
                if derived.is_empty() {
                    return Err(AppError::validation(
                        "name yields an empty slug; supply a slug explicitly",
                    )
                    .with_detail("field", "name")
                    .with_detail("value", name));
                }
                derived
            }
        };
        if slug.len() > MAX_SLUG_LEN {
            return Err(AppError::validation(format!(
                "slug is too long ({} chars, max {MAX_SLUG_LEN})",
                slug.len()
            ))
            .with_detail("field", "slug"));
        }
        Ok(slug)
    }
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    /// Explicit slug; derived from name when absent
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Update category payload
///
/// `parent_id` is absent here on purpose: re-parenting runs the cycle check
/// and goes through its own service operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// A category with one level of children materialized, for tree browsing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_slug() {
        let c = Category::new(&CategoryCreate {
            name: "Home & Garden".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.slug, "home-garden");
        assert!(c.is_active);
        assert_eq!(c.sort_order, 0);
    }

    #[test]
    fn test_new_accepts_explicit_slug() {
        let c = Category::new(&CategoryCreate {
            name: "Electronics".to_string(),
            slug: Some("gadgets".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.slug, "gadgets");
    }

    #[test]
    fn test_new_rejects_bad_explicit_slug() {
        let err = Category::new(&CategoryCreate {
            name: "Electronics".to_string(),
            slug: Some("Not A Slug".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_new_rejects_empty_derived_slug() {
        let err = Category::new(&CategoryCreate {
            name: "!!!".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_rename_regenerates_slug() {
        let mut c = Category::new(&CategoryCreate {
            name: "Phones".to_string(),
            ..Default::default()
        })
        .unwrap();
        c.apply_update(&CategoryUpdate {
            name: Some("Mobile Phones".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.name, "Mobile Phones");
        assert_eq!(c.slug, "mobile-phones");
    }

    #[test]
    fn test_rename_keeps_explicit_slug() {
        let mut c = Category::new(&CategoryCreate {
            name: "Phones".to_string(),
            ..Default::default()
        })
        .unwrap();
        c.apply_update(&CategoryUpdate {
            name: Some("Mobile Phones".to_string()),
            slug: Some("phones".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.slug, "phones");
    }

    #[test]
    fn test_update_slug_only() {
        let mut c = Category::new(&CategoryCreate {
            name: "Phones".to_string(),
            ..Default::default()
        })
        .unwrap();
        c.apply_update(&CategoryUpdate {
            slug: Some("cell-phones".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.name, "Phones");
        assert_eq!(c.slug, "cell-phones");
    }
}
