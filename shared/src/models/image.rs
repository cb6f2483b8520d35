//! Product Image Model

use crate::error::{AppError, AppResult};
use crate::types::{ImageId, ProductId, Timestamp, next_id, now_millis};
use crate::validation::{
    MAX_DESCRIPTION_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text,
};
use serde::{Deserialize, Serialize};

/// Image type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    Thumbnail,
    Gallery,
    Detail,
}

impl ImageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Gallery => "gallery",
            Self::Detail => "detail",
        }
    }
}

/// Product image entity
///
/// References the stored binary by URL only. The single-primary rule is an
/// aggregate invariant enforced by the service layer's `set_primary_image`;
/// the entity itself carries the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ImageId,
    pub product_id: ProductId,
    pub url: String,
    pub is_primary: bool,
    pub display_order: i32,
    pub alt_text: Option<String>,
    pub image_type: ImageType,
    /// Bytes, as reported by the upload boundary
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductImage {
    /// Build a validated image from a create payload.
    pub fn new(product_id: ProductId, payload: &ImageCreate) -> AppResult<Self> {
        validate_required_text(&payload.url, "url", MAX_URL_LEN)?;
        validate_optional_text(payload.alt_text.as_deref(), "alt_text", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(payload.mime_type.as_deref(), "mime_type", MAX_SHORT_TEXT_LEN)?;

        let display_order = payload.display_order.unwrap_or(0);
        if display_order < 0 {
            return Err(AppError::out_of_range("display_order must not be negative")
                .with_detail("field", "display_order")
                .with_detail("value", display_order));
        }
        if let Some(file_size) = payload.file_size
            && file_size < 0
        {
            return Err(AppError::out_of_range("file_size must not be negative")
                .with_detail("field", "file_size")
                .with_detail("value", file_size));
        }

        let now = now_millis();
        Ok(Self {
            id: next_id(),
            product_id,
            url: payload.url.trim().to_string(),
            is_primary: payload.is_primary.unwrap_or(false),
            display_order,
            alt_text: payload.alt_text.clone(),
            image_type: payload.image_type.unwrap_or(ImageType::Gallery),
            file_size: payload.file_size,
            mime_type: payload.mime_type.clone(),
            width: payload.width,
            height: payload.height,
            created_at: now,
            updated_at: now,
        })
    }

    /// Width/height ratio, when both dimensions are known and non-zero
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }

    /// Apply an update payload. The primary flag and display order move
    /// through the service layer's dedicated operations.
    pub fn apply_update(&mut self, update: &ImageUpdate) -> AppResult<()> {
        if let Some(url) = &update.url {
            validate_required_text(url, "url", MAX_URL_LEN)?;
        }
        validate_optional_text(update.alt_text.as_deref(), "alt_text", MAX_DESCRIPTION_LEN)?;

        if let Some(url) = &update.url {
            self.url = url.trim().to_string();
        }
        if let Some(alt_text) = &update.alt_text {
            self.alt_text = Some(alt_text.clone());
        }
        if let Some(image_type) = update.image_type {
            self.image_type = image_type;
        }
        self.updated_at = now_millis();
        Ok(())
    }
}

/// Create image payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageCreate {
    pub url: String,
    pub is_primary: Option<bool>,
    pub display_order: Option<i32>,
    pub alt_text: Option<String>,
    pub image_type: Option<ImageType>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Update image payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageUpdate {
    pub url: Option<String>,
    pub alt_text: Option<String>,
    pub image_type: Option<ImageType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn base_create() -> ImageCreate {
        ImageCreate {
            url: "https://cdn.example.com/p/1.jpg".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_defaults() {
        let img = ProductImage::new(7, &base_create()).unwrap();
        assert_eq!(img.product_id, 7);
        assert!(!img.is_primary);
        assert_eq!(img.display_order, 0);
        assert_eq!(img.image_type, ImageType::Gallery);
    }

    #[test]
    fn test_new_rejects_blank_url() {
        let err = ProductImage::new(
            7,
            &ImageCreate {
                url: "  ".to_string(),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_new_rejects_negative_display_order() {
        let err = ProductImage::new(
            7,
            &ImageCreate {
                display_order: Some(-1),
                ..base_create()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_aspect_ratio() {
        let mut img = ProductImage::new(7, &base_create()).unwrap();
        assert!(img.aspect_ratio().is_none());

        img.width = Some(1600);
        img.height = Some(900);
        let ratio = img.aspect_ratio().unwrap();
        assert!((ratio - 16.0 / 9.0).abs() < 1e-9);

        img.height = Some(0);
        assert!(img.aspect_ratio().is_none());
    }

    #[test]
    fn test_apply_update() {
        let mut img = ProductImage::new(7, &base_create()).unwrap();
        img.apply_update(&ImageUpdate {
            alt_text: Some("front view".to_string()),
            image_type: Some(ImageType::Detail),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(img.alt_text.as_deref(), Some("front view"));
        assert_eq!(img.image_type, ImageType::Detail);
    }
}
