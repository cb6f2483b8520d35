//! Product Model

use crate::error::{AppError, AppResult, ErrorCode};
use crate::types::{CategoryId, ProductId, Timestamp, next_id, now_millis};
use crate::validation::{
    MAX_DESCRIPTION_LEN, MAX_PRODUCT_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_positive, validate_range, validate_required_text, validate_scale,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::checked_stock_delta;
use super::image::{ImageCreate, ProductImage};
use super::variant::{ProductVariant, VariantCreate};

/// Product lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Inactive,
    OutOfStock,
    Discontinued,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::OutOfStock => "out_of_stock",
            Self::Discontinued => "discontinued",
        }
    }

    /// Check the status-vs-stock rule: Active requires stock > 0,
    /// OutOfStock requires stock == 0. Other statuses carry no stock rule.
    pub fn permits_stock(&self, stock: i64) -> bool {
        match self {
            Self::Active => stock > 0,
            Self::OutOfStock => stock == 0,
            Self::Inactive | Self::Discontinued => true,
        }
    }
}

/// Product entity
///
/// Owns its variants and images (stored separately, keyed by product id).
/// Mutate only through the methods below so the stock and status invariants
/// hold after every successful call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    /// Category reference (required)
    pub category_id: CategoryId,
    pub price: Decimal,
    pub weight: Option<Decimal>,
    /// Rating 0-5, at most 2 decimal places
    pub rating: Option<Decimal>,
    pub stock_quantity: i64,
    pub status: ProductStatus,
    pub sku: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Build a validated product from a create payload.
    ///
    /// When the payload carries no status the initial status is derived from
    /// stock: Active if stock > 0, otherwise OutOfStock. An explicit status
    /// that conflicts with the stock level is rejected.
    pub fn new(payload: &ProductCreate) -> AppResult<Self> {
        validate_required_text(&payload.name, "name", MAX_PRODUCT_NAME_LEN)?;
        validate_optional_text(payload.description.as_deref(), "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(payload.brand.as_deref(), "brand", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(payload.sku.as_deref(), "sku", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(payload.size.as_deref(), "size", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(payload.color.as_deref(), "color", MAX_SHORT_TEXT_LEN)?;

        validate_positive(payload.price, "price")?;
        validate_scale(payload.price, 2, "price")?;
        if let Some(weight) = payload.weight {
            validate_positive(weight, "weight")?;
        }
        if let Some(rating) = payload.rating {
            validate_range(rating, Decimal::ZERO, Decimal::from(5), "rating")?;
            validate_scale(rating, 2, "rating")?;
        }

        let stock = payload.stock_quantity.unwrap_or(0);
        if stock < 0 {
            return Err(AppError::out_of_range("stock_quantity must not be negative")
                .with_detail("field", "stock_quantity")
                .with_detail("value", stock));
        }

        let status = match payload.status {
            Some(status) => {
                if !status.permits_stock(stock) {
                    return Err(AppError::with_message(
                        ErrorCode::InvalidStatusTransition,
                        format!(
                            "status {} conflicts with stock quantity {}",
                            status.as_str(),
                            stock
                        ),
                    )
                    .with_detail("status", status.as_str())
                    .with_detail("stock", stock));
                }
                status
            }
            None if stock > 0 => ProductStatus::Active,
            None => ProductStatus::OutOfStock,
        };

        let now = now_millis();
        Ok(Self {
            id: next_id(),
            name: payload.name.trim().to_string(),
            description: payload.description.clone(),
            brand: payload.brand.clone(),
            category_id: payload.category_id,
            price: payload.price,
            weight: payload.weight,
            rating: payload.rating,
            stock_quantity: stock,
            status,
            sku: payload.sku.clone(),
            size: payload.size.clone(),
            color: payload.color.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    // ==================== Derived values ====================

    /// Own stock is above zero
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Active and in stock
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Active && self.is_in_stock()
    }

    /// Sum of variant stock when variants exist, own stock otherwise
    pub fn total_stock(&self, variants: &[ProductVariant]) -> i64 {
        if variants.is_empty() {
            self.stock_quantity
        } else {
            variants.iter().map(|v| v.stock_quantity).sum()
        }
    }

    pub fn has_primary_image(&self, images: &[ProductImage]) -> bool {
        images.iter().any(|i| i.is_primary)
    }

    // ==================== Mutation ====================

    /// Apply a stock delta, rejecting a negative result with no state change.
    ///
    /// Active and OutOfStock are kept consistent with the new quantity:
    /// crossing zero in either direction flips between the two. Inactive and
    /// Discontinued are left untouched.
    pub fn apply_stock_delta(&mut self, delta: i64) -> AppResult<()> {
        let next = checked_stock_delta(self.stock_quantity, delta)?;
        self.stock_quantity = next;
        match self.status {
            ProductStatus::Active if next == 0 => self.status = ProductStatus::OutOfStock,
            ProductStatus::OutOfStock if next > 0 => self.status = ProductStatus::Active,
            _ => {}
        }
        self.updated_at = now_millis();
        Ok(())
    }

    /// Move to a new status, enforcing the status-vs-stock rule.
    /// Any status may move to any other as long as the stock rule holds.
    pub fn transition_status(&mut self, new_status: ProductStatus) -> AppResult<()> {
        if !new_status.permits_stock(self.stock_quantity) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!(
                    "cannot move to {} with stock quantity {}",
                    new_status.as_str(),
                    self.stock_quantity
                ),
            )
            .with_detail("status", new_status.as_str())
            .with_detail("stock", self.stock_quantity));
        }
        self.status = new_status;
        self.updated_at = now_millis();
        Ok(())
    }

    /// Apply an update payload. Stock and status move through their dedicated
    /// methods, not here.
    pub fn apply_update(&mut self, update: &ProductUpdate) -> AppResult<()> {
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_PRODUCT_NAME_LEN)?;
        }
        validate_optional_text(update.description.as_deref(), "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(update.brand.as_deref(), "brand", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(update.sku.as_deref(), "sku", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(update.size.as_deref(), "size", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(update.color.as_deref(), "color", MAX_SHORT_TEXT_LEN)?;
        if let Some(price) = update.price {
            validate_positive(price, "price")?;
            validate_scale(price, 2, "price")?;
        }
        if let Some(weight) = update.weight {
            validate_positive(weight, "weight")?;
        }
        if let Some(rating) = update.rating {
            validate_range(rating, Decimal::ZERO, Decimal::from(5), "rating")?;
            validate_scale(rating, 2, "rating")?;
        }

        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(brand) = &update.brand {
            self.brand = Some(brand.clone());
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(rating) = update.rating {
            self.rating = Some(rating);
        }
        if let Some(sku) = &update.sku {
            self.sku = Some(sku.clone());
        }
        if let Some(size) = &update.size {
            self.size = Some(size.clone());
        }
        if let Some(color) = &update.color {
            self.color = Some(color.clone());
        }
        self.updated_at = now_millis();
        Ok(())
    }
}

/// Create product payload
///
/// Child variant and image definitions are built as part of the same
/// aggregate creation: a failure in any child fails the whole create.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub weight: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub stock_quantity: Option<i64>,
    pub status: Option<ProductStatus>,
    pub sku: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub variants: Vec<VariantCreate>,
    #[serde(default)]
    pub images: Vec<ImageCreate>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub category_id: Option<CategoryId>,
    pub price: Option<Decimal>,
    pub weight: Option<Decimal>,
    pub rating: Option<Decimal>,
    pub sku: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}
