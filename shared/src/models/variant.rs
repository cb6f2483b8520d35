//! Product Variant Model

use crate::error::{AppError, AppResult, ErrorCode};
use crate::types::{ProductId, Timestamp, VariantId, next_id, now_millis};
use crate::validation::{
    MAX_ATTR_NAME_LEN, MAX_ATTR_VALUE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_scale, validate_variant_name,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::checked_stock_delta;
use super::product::ProductStatus;

/// Product variant entity
///
/// A sellable variation of a product (size/color/material combination).
/// Price override of zero means "inherit the product price".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    /// Unique per product, case-insensitive
    pub name: String,
    /// 0 = no override, use the product price
    pub price_override: Decimal,
    pub stock_quantity: i64,
    /// name -> value, sorted for stable serialization
    pub attributes: BTreeMap<String, String>,
    /// Globally unique when present
    pub sku: Option<String>,
    pub status: ProductStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductVariant {
    /// Build a validated variant from a create payload.
    pub fn new(product_id: ProductId, payload: &VariantCreate) -> AppResult<Self> {
        validate_variant_name(&payload.name)?;
        validate_optional_text(payload.sku.as_deref(), "sku", MAX_SHORT_TEXT_LEN)?;

        let price_override = payload.price_override.unwrap_or(Decimal::ZERO);
        if price_override < Decimal::ZERO {
            return Err(AppError::out_of_range("price_override must not be negative")
                .with_detail("field", "price_override")
                .with_detail("value", price_override.to_string()));
        }
        validate_scale(price_override, 2, "price_override")?;

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

        let mut attributes = BTreeMap::new();
        if let Some(attrs) = &payload.attributes {
            for (name, value) in attrs {
                validate_attribute(name, value)?;
                attributes.insert(name.clone(), value.clone());
            }
        }

        let now = now_millis();
        Ok(Self {
            id: next_id(),
            product_id,
            name: payload.name.trim().to_string(),
            price_override,
            stock_quantity: stock,
            attributes,
            sku: payload.sku.clone().filter(|s| !s.trim().is_empty()),
            status,
            created_at: now,
            updated_at: now,
        })
    }

    // ==================== Derived values ====================

    pub fn has_price_override(&self) -> bool {
        self.price_override > Decimal::ZERO
    }

    /// Price override when set, otherwise the owning product's price
    pub fn effective_price(&self, product_price: Decimal) -> Decimal {
        if self.has_price_override() {
            self.price_override
        } else {
            product_price
        }
    }

    // ==================== Mutation ====================

    /// Apply a stock delta with the same rules as the product: reject a
    /// negative result, flip between Active and OutOfStock at zero.
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

    /// Insert or overwrite an attribute. Last write wins on duplicate names.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> AppResult<()> {
        validate_attribute(name, value)?;
        self.attributes.insert(name.to_string(), value.to_string());
        self.updated_at = now_millis();
        Ok(())
    }

    /// Remove an attribute by name. Returns the removed value, if any.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let removed = self.attributes.remove(name);
        if removed.is_some() {
            self.updated_at = now_millis();
        }
        removed
    }

    /// Apply an update payload. Name uniqueness is the service layer's job;
    /// stock and status move through their dedicated methods.
    pub fn apply_update(&mut self, update: &VariantUpdate) -> AppResult<()> {
        if let Some(name) = &update.name {
            validate_variant_name(name)?;
        }
        validate_optional_text(update.sku.as_deref(), "sku", MAX_SHORT_TEXT_LEN)?;
        if let Some(price_override) = update.price_override {
            if price_override < Decimal::ZERO {
                return Err(AppError::out_of_range("price_override must not be negative")
                    .with_detail("field", "price_override")
                    .with_detail("value", price_override.to_string()));
            }
            validate_scale(price_override, 2, "price_override")?;
        }

        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(price_override) = update.price_override {
            self.price_override = price_override;
        }
        if let Some(sku) = &update.sku {
            self.sku = Some(sku.clone()).filter(|s| !s.trim().is_empty());
        }
        self.updated_at = now_millis();
        Ok(())
    }
}

/// Validate an attribute name/value pair against the length limits.
fn validate_attribute(name: &str, value: &str) -> AppResult<()> {
    if name.trim().is_empty() || name.len() > MAX_ATTR_NAME_LEN {
        return Err(AppError::with_message(
            ErrorCode::InvalidAttribute,
            format!("attribute name must be 1-{MAX_ATTR_NAME_LEN} characters"),
        )
        .with_detail("name", name));
    }
    if value.len() > MAX_ATTR_VALUE_LEN {
        return Err(AppError::with_message(
            ErrorCode::InvalidAttribute,
            format!("attribute value must be at most {MAX_ATTR_VALUE_LEN} characters"),
        )
        .with_detail("name", name));
    }
    Ok(())
}

/// Create variant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantCreate {
    pub name: String,
    pub price_override: Option<Decimal>,
    pub stock_quantity: Option<i64>,
    pub attributes: Option<BTreeMap<String, String>>,
    pub sku: Option<String>,
    pub status: Option<ProductStatus>,
}

/// Update variant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantUpdate {
    pub name: Option<String>,
    pub price_override: Option<Decimal>,
    pub sku: Option<String>,
}
