//! Specification builders
//!
//! Per-entity factories that turn optional search criteria into
//! [`PredicateSpec`] values. Every builder is null-safe: a `None` or blank
//! criterion yields `Always`, which disappears under `and` composition, so
//! composite builders need no special-casing at the call site.

use super::spec::{EntityField, FieldValue, PredicateSpec};
use rust_decimal::Decimal;
use shared::models::{Category, Product, ProductStatus, ProductVariant};
use shared::query::{CategoryFilter, ProductFilter, VariantFilter};

// ==================== Field enums ====================

/// Filterable product fields
#[derive(Debug, Clone, PartialEq)]
pub enum ProductField {
    Name,
    Description,
    Brand,
    CategoryId,
    Status,
    Price,
    Rating,
    Stock,
    Sku,
}

impl EntityField for ProductField {
    type Entity = Product;

    fn name(&self) -> String {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Brand => "brand",
            Self::CategoryId => "category_id",
            Self::Status => "status",
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Stock => "stock_quantity",
            Self::Sku => "sku",
        }
        .to_string()
    }

    fn value_of(&self, p: &Product) -> FieldValue {
        match self {
            Self::Name => FieldValue::Str(p.name.clone()),
            Self::Description => opt_str(p.description.as_deref()),
            Self::Brand => opt_str(p.brand.as_deref()),
            Self::CategoryId => FieldValue::Int(p.category_id),
            Self::Status => FieldValue::Str(p.status.as_str().to_string()),
            Self::Price => FieldValue::Dec(p.price),
            Self::Rating => p.rating.map(FieldValue::Dec).unwrap_or(FieldValue::Null),
            Self::Stock => FieldValue::Int(p.stock_quantity),
            Self::Sku => opt_str(p.sku.as_deref()),
        }
    }
}

/// Filterable category fields
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryField {
    Name,
    Slug,
    ParentId,
    IsActive,
    SortOrder,
}

impl EntityField for CategoryField {
    type Entity = Category;

    fn name(&self) -> String {
        match self {
            Self::Name => "name",
            Self::Slug => "slug",
            Self::ParentId => "parent_id",
            Self::IsActive => "is_active",
            Self::SortOrder => "sort_order",
        }
        .to_string()
    }

    fn value_of(&self, c: &Category) -> FieldValue {
        match self {
            Self::Name => FieldValue::Str(c.name.clone()),
            Self::Slug => FieldValue::Str(c.slug.clone()),
            Self::ParentId => c.parent_id.map(FieldValue::Int).unwrap_or(FieldValue::Null),
            Self::IsActive => FieldValue::Bool(c.is_active),
            Self::SortOrder => FieldValue::Int(i64::from(c.sort_order)),
        }
    }
}

/// Filterable variant fields; `Attr` reaches into the attribute map by name
#[derive(Debug, Clone, PartialEq)]
pub enum VariantField {
    Name,
    ProductId,
    Sku,
    Status,
    Stock,
    PriceOverride,
    Attr(String),
}

impl EntityField for VariantField {
    type Entity = ProductVariant;

    fn name(&self) -> String {
        match self {
            Self::Name => "name".to_string(),
            Self::ProductId => "product_id".to_string(),
            Self::Sku => "sku".to_string(),
            Self::Status => "status".to_string(),
            Self::Stock => "stock_quantity".to_string(),
            Self::PriceOverride => "price_override".to_string(),
            Self::Attr(name) => format!("attributes.{name}"),
        }
    }

    fn value_of(&self, v: &ProductVariant) -> FieldValue {
        match self {
            Self::Name => FieldValue::Str(v.name.clone()),
            Self::ProductId => FieldValue::Int(v.product_id),
            Self::Sku => opt_str(v.sku.as_deref()),
            Self::Status => FieldValue::Str(v.status.as_str().to_string()),
            Self::Stock => FieldValue::Int(v.stock_quantity),
            Self::PriceOverride => FieldValue::Dec(v.price_override),
            Self::Attr(name) => opt_str(v.attributes.get(name).map(String::as_str)),
        }
    }
}

fn opt_str(v: Option<&str>) -> FieldValue {
    v.map(|s| FieldValue::Str(s.to_string()))
        .unwrap_or(FieldValue::Null)
}

/// A blank criterion counts as absent.
fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}

// ==================== Product specs ====================

pub struct ProductSpecs;

impl ProductSpecs {
    /// Case-insensitive substring match on the product name
    pub fn by_name(name: Option<&str>) -> PredicateSpec<ProductField> {
        match non_blank(name) {
            Some(name) => PredicateSpec::contains(ProductField::Name, name, true),
            None => PredicateSpec::Always,
        }
    }

    pub fn by_brand(brand: Option<&str>) -> PredicateSpec<ProductField> {
        match non_blank(brand) {
            Some(brand) => PredicateSpec::equals(ProductField::Brand, brand),
            None => PredicateSpec::Always,
        }
    }

    pub fn by_category(category_id: Option<i64>) -> PredicateSpec<ProductField> {
        match category_id {
            Some(id) => PredicateSpec::equals(ProductField::CategoryId, id),
            None => PredicateSpec::Always,
        }
    }

    pub fn by_status(status: Option<ProductStatus>) -> PredicateSpec<ProductField> {
        match status {
            Some(status) => PredicateSpec::equals(ProductField::Status, status.as_str()),
            None => PredicateSpec::Always,
        }
    }

    /// Inclusive price range; either bound may be absent
    pub fn by_price_range(
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> PredicateSpec<ProductField> {
        if min.is_none() && max.is_none() {
            return PredicateSpec::Always;
        }
        PredicateSpec::between(ProductField::Price, min, max)
    }

    pub fn by_min_rating(min: Option<Decimal>) -> PredicateSpec<ProductField> {
        match min {
            Some(min) => PredicateSpec::between(ProductField::Rating, Some(min), None::<Decimal>),
            None => PredicateSpec::Always,
        }
    }

    /// Only `Some(true)` contributes a clause (stock > 0). `Some(false)` is
    /// treated as "don't care", the same as `None`.
    pub fn in_stock(flag: Option<bool>) -> PredicateSpec<ProductField> {
        match flag {
            Some(true) => PredicateSpec::greater_than(ProductField::Stock, 0i64),
            Some(false) | None => PredicateSpec::Always,
        }
    }

    /// Case-insensitive substring OR'd across name and description.
    /// A blank term yields `Always`.
    pub fn search_in_name_or_description(term: Option<&str>) -> PredicateSpec<ProductField> {
        match non_blank(term) {
            Some(term) => PredicateSpec::contains(ProductField::Name, term, true)
                .or(PredicateSpec::contains(ProductField::Description, term, true)),
            None => PredicateSpec::Always,
        }
    }

    /// Compose the full product filter: each present criterion contributes
    /// one AND clause, absent criteria contribute nothing.
    pub fn with_filters(filter: &ProductFilter) -> PredicateSpec<ProductField> {
        Self::by_name(filter.name.as_deref())
            .and(Self::by_brand(filter.brand.as_deref()))
            .and(Self::by_category(filter.category_id))
            .and(Self::by_status(filter.status))
            .and(Self::by_price_range(filter.min_price, filter.max_price))
            .and(Self::by_min_rating(filter.min_rating))
            .and(Self::in_stock(filter.in_stock))
            .and(Self::search_in_name_or_description(filter.search.as_deref()))
    }
}

// ==================== Category specs ====================

pub struct CategorySpecs;

impl CategorySpecs {
    pub fn by_name(name: Option<&str>) -> PredicateSpec<CategoryField> {
        match non_blank(name) {
            Some(name) => PredicateSpec::contains(CategoryField::Name, name, true),
            None => PredicateSpec::Always,
        }
    }

    /// Children of a specific parent; `None` yields `Always`, not "roots" --
    /// root listing goes through the tree operation instead.
    pub fn by_parent(parent_id: Option<i64>) -> PredicateSpec<CategoryField> {
        match parent_id {
            Some(id) => PredicateSpec::equals(CategoryField::ParentId, id),
            None => PredicateSpec::Always,
        }
    }

    pub fn by_active(flag: Option<bool>) -> PredicateSpec<CategoryField> {
        match flag {
            Some(flag) => PredicateSpec::equals(CategoryField::IsActive, flag),
            None => PredicateSpec::Always,
        }
    }

    pub fn with_filters(filter: &CategoryFilter) -> PredicateSpec<CategoryField> {
        Self::by_name(filter.name.as_deref())
            .and(Self::by_parent(filter.parent_id))
            .and(Self::by_active(filter.is_active))
    }
}

// ==================== Variant specs ====================

pub struct VariantSpecs;

impl VariantSpecs {
    pub fn by_name(name: Option<&str>) -> PredicateSpec<VariantField> {
        match non_blank(name) {
            Some(name) => PredicateSpec::contains(VariantField::Name, name, true),
            None => PredicateSpec::Always,
        }
    }

    pub fn by_product(product_id: i64) -> PredicateSpec<VariantField> {
        PredicateSpec::equals(VariantField::ProductId, product_id)
    }

    pub fn by_sku(sku: Option<&str>) -> PredicateSpec<VariantField> {
        match non_blank(sku) {
            Some(sku) => PredicateSpec::equals(VariantField::Sku, sku),
            None => PredicateSpec::Always,
        }
    }

    pub fn by_status(status: Option<ProductStatus>) -> PredicateSpec<VariantField> {
        match status {
            Some(status) => PredicateSpec::equals(VariantField::Status, status.as_str()),
            None => PredicateSpec::Always,
        }
    }

    pub fn in_stock(flag: Option<bool>) -> PredicateSpec<VariantField> {
        match flag {
            Some(true) => PredicateSpec::greater_than(VariantField::Stock, 0i64),
            Some(false) | None => PredicateSpec::Always,
        }
    }

    /// Variant carries the given attribute with exactly the given value
    pub fn by_attribute(attribute: Option<&(String, String)>) -> PredicateSpec<VariantField> {
        match attribute {
            Some((name, value)) => {
                PredicateSpec::equals(VariantField::Attr(name.clone()), value.as_str())
            }
            None => PredicateSpec::Always,
        }
    }

    pub fn with_filters(filter: &VariantFilter) -> PredicateSpec<VariantField> {
        Self::by_name(filter.name.as_deref())
            .and(Self::by_status(filter.status))
            .and(Self::by_sku(filter.sku.as_deref()))
            .and(Self::in_stock(filter.in_stock))
            .and(Self::by_attribute(filter.attribute.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ProductCreate, VariantCreate};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn product(name: &str, price: &str, stock: i64) -> Product {
        Product::new(&ProductCreate {
            name: name.to_string(),
            category_id: 1,
            price: dec(price),
            stock_quantity: Some(stock),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_blank_criteria_yield_always() {
        assert_eq!(ProductSpecs::by_name(None), PredicateSpec::Always);
        assert_eq!(ProductSpecs::by_name(Some("   ")), PredicateSpec::Always);
        assert_eq!(
            ProductSpecs::search_in_name_or_description(Some("")),
            PredicateSpec::Always
        );
        assert_eq!(
            ProductSpecs::by_price_range(None, None),
            PredicateSpec::Always
        );
    }

    #[test]
    fn test_all_null_filter_matches_everything() {
        let spec = ProductSpecs::with_filters(&ProductFilter::default());
        assert_eq!(spec, PredicateSpec::Always);
        assert!(spec.matches(&product("anything", "1.00", 0)));
    }

    #[test]
    fn test_in_stock_false_contributes_nothing() {
        assert_eq!(ProductSpecs::in_stock(Some(false)), PredicateSpec::Always);
        assert_ne!(ProductSpecs::in_stock(Some(true)), PredicateSpec::Always);
    }

    #[test]
    fn test_price_and_stock_filter() {
        let filter = ProductFilter {
            min_price: Some(dec("10")),
            in_stock: Some(true),
            ..Default::default()
        };
        let spec = ProductSpecs::with_filters(&filter);

        let items = [
            product("a", "5.00", 1),
            product("b", "20.00", 0),
            product("c", "30.00", 2),
        ];
        let matched: Vec<&str> = items
            .iter()
            .filter(|p| spec.matches(p))
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(matched, vec!["c"]);
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let mut p = product("Blue Widget", "1.00", 1);
        p.description = Some("a very nice gadget".to_string());

        assert!(ProductSpecs::search_in_name_or_description(Some("widget")).matches(&p));
        assert!(ProductSpecs::search_in_name_or_description(Some("GADGET")).matches(&p));
        assert!(!ProductSpecs::search_in_name_or_description(Some("missing")).matches(&p));
    }

    #[test]
    fn test_variant_attribute_spec() {
        let mut v = ProductVariant::new(
            1,
            &VariantCreate {
                name: "Red-L".to_string(),
                stock_quantity: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        v.set_attribute("color", "red").unwrap();

        let spec = VariantSpecs::by_attribute(Some(&("color".to_string(), "red".to_string())));
        assert!(spec.matches(&v));

        let wrong = VariantSpecs::by_attribute(Some(&("color".to_string(), "blue".to_string())));
        assert!(!wrong.matches(&v));

        // missing attribute is a null value, never a match
        let absent = VariantSpecs::by_attribute(Some(&("size".to_string(), "L".to_string())));
        assert!(!absent.matches(&v));
    }

    #[test]
    fn test_status_spec() {
        let p = product("a", "1.00", 5);
        assert!(ProductSpecs::by_status(Some(ProductStatus::Active)).matches(&p));
        assert!(!ProductSpecs::by_status(Some(ProductStatus::Discontinued)).matches(&p));
    }
}
