//! Predicate specification algebra
//!
//! A spec is a declarative boolean predicate over an entity type, built from
//! a small set of tagged variants. It can be interpreted directly against
//! in-memory values (see [`PredicateSpec::matches`]) or walked by a storage
//! adapter and compiled into a native filter; the algebra itself carries no
//! query-execution dependency.
//!
//! Null criteria compose silently: builders return [`PredicateSpec::Always`]
//! for an absent criterion, and `and` treats `Always` as its identity, so a
//! chain of optional filters never needs null checks at the call site.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A field's value as seen by the predicate interpreter.
///
/// `Null` compares unequal to everything (including itself) and fails every
/// range/containment test, mirroring three-valued comparison semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Dec(Decimal),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Ordering between values of the same variant; `None` across variants
    /// or when either side is null.
    fn compare(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Dec(a), Self::Dec(b)) => Some(a.cmp(b)),
            // Int/Dec mix: promote the int side
            (Self::Int(a), Self::Dec(b)) => Some(Decimal::from(*a).cmp(b)),
            (Self::Dec(a), Self::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn equals(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        self.compare(other) == Some(std::cmp::Ordering::Equal)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        Self::Dec(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// A typed handle onto one filterable field of an entity.
///
/// Implemented by per-entity field enums: `name()` gives a storage adapter a
/// stable column key, `value_of()` gives the in-memory interpreter the
/// field's current value.
pub trait EntityField {
    type Entity;

    fn name(&self) -> String;
    fn value_of(&self, entity: &Self::Entity) -> FieldValue;
}

/// Composable predicate over an entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateSpec<F: EntityField> {
    /// Matches everything; the identity of `and` composition
    Always,
    Equals {
        field: F,
        value: FieldValue,
    },
    /// Each bound independently optional: only the present bounds are tested
    Between {
        field: F,
        min: Option<FieldValue>,
        max: Option<FieldValue>,
    },
    /// Substring match on a string field
    Contains {
        field: F,
        needle: String,
        case_insensitive: bool,
    },
    In {
        field: F,
        values: Vec<FieldValue>,
    },
    GreaterThan {
        field: F,
        value: FieldValue,
    },
    IsNull {
        field: F,
    },
    IsNotNull {
        field: F,
    },
    And(Box<PredicateSpec<F>>, Box<PredicateSpec<F>>),
    Or(Box<PredicateSpec<F>>, Box<PredicateSpec<F>>),
    Not(Box<PredicateSpec<F>>),
}

impl<F: EntityField> PredicateSpec<F> {
    pub fn always() -> Self {
        Self::Always
    }

    pub fn equals(field: F, value: impl Into<FieldValue>) -> Self {
        Self::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn between(
        field: F,
        min: Option<impl Into<FieldValue>>,
        max: Option<impl Into<FieldValue>>,
    ) -> Self {
        Self::Between {
            field,
            min: min.map(Into::into),
            max: max.map(Into::into),
        }
    }

    pub fn contains(field: F, needle: impl Into<String>, case_insensitive: bool) -> Self {
        Self::Contains {
            field,
            needle: needle.into(),
            case_insensitive,
        }
    }

    pub fn in_values(field: F, values: Vec<FieldValue>) -> Self {
        Self::In { field, values }
    }

    pub fn greater_than(field: F, value: impl Into<FieldValue>) -> Self {
        Self::GreaterThan {
            field,
            value: value.into(),
        }
    }

    pub fn is_null(field: F) -> Self {
        Self::IsNull { field }
    }

    pub fn is_not_null(field: F) -> Self {
        Self::IsNotNull { field }
    }

    /// Conjunction. `Always` is the identity on either side, so ANDing a
    /// no-op filter returns the other spec unchanged.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, other) => other,
            (spec, Self::Always) => spec,
            (a, b) => Self::And(Box::new(a), Box::new(b)),
        }
    }

    /// Disjunction. No identity collapse: `or(spec, always())` legitimately
    /// matches everything.
    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Interpret the spec against an in-memory entity.
    ///
    /// `And`/`Or` short-circuit; comparisons involving a null field value
    /// are false except for `IsNull`.
    pub fn matches(&self, entity: &F::Entity) -> bool {
        match self {
            Self::Always => true,
            Self::Equals { field, value } => field.value_of(entity).equals(value),
            Self::Between { field, min, max } => {
                let actual = field.value_of(entity);
                if actual.is_null() {
                    return false;
                }
                if let Some(min) = min {
                    match actual.compare(min) {
                        Some(ord) if ord != std::cmp::Ordering::Less => {}
                        _ => return false,
                    }
                }
                if let Some(max) = max {
                    match actual.compare(max) {
                        Some(ord) if ord != std::cmp::Ordering::Greater => {}
                        _ => return false,
                    }
                }
                true
            }
            Self::Contains {
                field,
                needle,
                case_insensitive,
            } => match field.value_of(entity) {
                FieldValue::Str(haystack) => {
                    if *case_insensitive {
                        haystack.to_lowercase().contains(&needle.to_lowercase())
                    } else {
                        haystack.contains(needle.as_str())
                    }
                }
                _ => false,
            },
            Self::In { field, values } => {
                let actual = field.value_of(entity);
                values.iter().any(|v| actual.equals(v))
            }
            Self::GreaterThan { field, value } => {
                field.value_of(entity).compare(value) == Some(std::cmp::Ordering::Greater)
            }
            Self::IsNull { field } => field.value_of(entity).is_null(),
            Self::IsNotNull { field } => !field.value_of(entity).is_null(),
            Self::And(a, b) => a.matches(entity) && b.matches(entity),
            Self::Or(a, b) => a.matches(entity) || b.matches(entity),
            Self::Not(inner) => !inner.matches(entity),
        }
    }

    /// AND together a sequence of optional clauses, starting from `Always`.
    /// Absent criteria contribute nothing.
    pub fn all(clauses: impl IntoIterator<Item = Option<Self>>) -> Self {
        clauses
            .into_iter()
            .flatten()
            .fold(Self::Always, PredicateSpec::and)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal entity/field pair for exercising the algebra in isolation.
    struct Item {
        name: String,
        price: Decimal,
        stock: i64,
        note: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum ItemField {
        Name,
        Price,
        Stock,
        Note,
    }

    impl EntityField for ItemField {
        type Entity = Item;

        fn name(&self) -> String {
            match self {
                Self::Name => "name",
                Self::Price => "price",
                Self::Stock => "stock",
                Self::Note => "note",
            }
            .to_string()
        }

        fn value_of(&self, entity: &Item) -> FieldValue {
            match self {
                Self::Name => FieldValue::Str(entity.name.clone()),
                Self::Price => FieldValue::Dec(entity.price),
                Self::Stock => FieldValue::Int(entity.stock),
                Self::Note => entity
                    .note
                    .clone()
                    .map(FieldValue::Str)
                    .unwrap_or(FieldValue::Null),
            }
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(name: &str, price: &str, stock: i64) -> Item {
        Item {
            name: name.to_string(),
            price: dec(price),
            stock,
            note: None,
        }
    }

    #[test]
    fn test_always_matches_everything() {
        let spec: PredicateSpec<ItemField> = PredicateSpec::always();
        assert!(spec.matches(&item("a", "1", 0)));
    }

    #[test]
    fn test_equals() {
        let spec = PredicateSpec::equals(ItemField::Name, "widget");
        assert!(spec.matches(&item("widget", "1", 0)));
        assert!(!spec.matches(&item("gadget", "1", 0)));
    }

    #[test]
    fn test_equals_null_is_false() {
        let spec = PredicateSpec::equals(ItemField::Note, "x");
        assert!(!spec.matches(&item("a", "1", 0)));
    }

    #[test]
    fn test_between_each_bound_optional() {
        let lower_only =
            PredicateSpec::between(ItemField::Price, Some(dec("10")), None::<Decimal>);
        assert!(lower_only.matches(&item("a", "10", 0)));
        assert!(lower_only.matches(&item("a", "99", 0)));
        assert!(!lower_only.matches(&item("a", "9.99", 0)));

        let upper_only =
            PredicateSpec::between(ItemField::Price, None::<Decimal>, Some(dec("20")));
        assert!(upper_only.matches(&item("a", "20", 0)));
        assert!(!upper_only.matches(&item("a", "20.01", 0)));

        let both = PredicateSpec::between(ItemField::Price, Some(dec("10")), Some(dec("20")));
        assert!(both.matches(&item("a", "15", 0)));
        assert!(!both.matches(&item("a", "25", 0)));
    }

    #[test]
    fn test_contains_case_insensitive() {
        let spec = PredicateSpec::contains(ItemField::Name, "WID", true);
        assert!(spec.matches(&item("Blue Widget", "1", 0)));

        let sensitive = PredicateSpec::contains(ItemField::Name, "WID", false);
        assert!(!sensitive.matches(&item("Blue Widget", "1", 0)));
    }

    #[test]
    fn test_in_values() {
        let spec = PredicateSpec::in_values(
            ItemField::Stock,
            vec![FieldValue::Int(1), FieldValue::Int(3)],
        );
        assert!(spec.matches(&item("a", "1", 3)));
        assert!(!spec.matches(&item("a", "1", 2)));
    }

    #[test]
    fn test_greater_than() {
        let spec = PredicateSpec::greater_than(ItemField::Stock, 0i64);
        assert!(spec.matches(&item("a", "1", 1)));
        assert!(!spec.matches(&item("a", "1", 0)));
    }

    #[test]
    fn test_null_checks() {
        let with_note = Item {
            note: Some("x".to_string()),
            ..item("a", "1", 0)
        };
        assert!(PredicateSpec::is_null(ItemField::Note).matches(&item("a", "1", 0)));
        assert!(PredicateSpec::is_not_null(ItemField::Note).matches(&with_note));
    }

    #[test]
    fn test_and_identity_law() {
        let spec = PredicateSpec::equals(ItemField::Name, "widget");
        assert_eq!(spec.clone().and(PredicateSpec::Always), spec);
        assert_eq!(PredicateSpec::Always.and(spec.clone()), spec);
    }

    #[test]
    fn test_or_with_always_matches_everything() {
        let spec = PredicateSpec::equals(ItemField::Name, "widget").or(PredicateSpec::Always);
        assert!(spec.matches(&item("anything", "1", 0)));
    }

    #[test]
    fn test_not() {
        let spec = PredicateSpec::equals(ItemField::Name, "widget").not();
        assert!(!spec.matches(&item("widget", "1", 0)));
        assert!(spec.matches(&item("gadget", "1", 0)));
    }

    #[test]
    fn test_and_or_combination() {
        let cheap = PredicateSpec::between(ItemField::Price, None::<Decimal>, Some(dec("10")));
        let stocked = PredicateSpec::greater_than(ItemField::Stock, 0i64);
        let spec = cheap.and(stocked);
        assert!(spec.matches(&item("a", "5", 2)));
        assert!(!spec.matches(&item("a", "5", 0)));
        assert!(!spec.matches(&item("a", "15", 2)));
    }

    #[test]
    fn test_all_skips_absent_clauses() {
        let spec = PredicateSpec::all([
            None,
            Some(PredicateSpec::greater_than(ItemField::Stock, 0i64)),
            None,
        ]);
        assert!(spec.matches(&item("a", "1", 1)));
        assert!(!spec.matches(&item("a", "1", 0)));

        let empty = PredicateSpec::<ItemField>::all([None, None]);
        assert_eq!(empty, PredicateSpec::Always);
    }
}
