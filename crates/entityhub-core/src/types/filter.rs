//! Entity-agnostic query filters.
//!
//! A [`QueryFilter`] is a set of `field = value` constraints plus a page
//! window. It knows nothing about the entity it will be applied to; the
//! query engine resolves field names against [`Entity::FIELDS`] at
//! evaluation time.
//!
//! [`Entity::FIELDS`]: crate::traits::Entity::FIELDS

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::query::{DEFAULT_LIMIT, QueryConfig};
use crate::types::field::{FieldKind, FieldValue};
use crate::types::pagination::PageRequest;

/// Query-string key holding the page number.
pub const PAGE_PARAM: &str = "page";
/// Query-string key holding the page size.
pub const LIMIT_PARAM: &str = "limit";

/// A value a client asks a field to equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Matches only absent values.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value, coerced to the field's kind before comparison.
    String(String),
}

impl FilterValue {
    /// Convert this value into the representation of a field of `kind`.
    ///
    /// Returns `None` when the value cannot represent any value of that
    /// kind (e.g. `"abc"` for an integer field); such a constraint matches
    /// no rows.
    pub fn coerce(&self, kind: FieldKind) -> Option<FieldValue> {
        match (self, kind) {
            (Self::Null, _) => Some(FieldValue::Null),

            (Self::String(s), FieldKind::Text) => Some(FieldValue::Text(s.clone())),
            (Self::String(s), FieldKind::Integer) => s.trim().parse().ok().map(FieldValue::Integer),
            (Self::String(s), FieldKind::Float) => s.trim().parse().ok().map(FieldValue::Float),
            (Self::String(s), FieldKind::Bool) => parse_bool(s).map(FieldValue::Bool),

            (Self::Integer(i), FieldKind::Integer) => Some(FieldValue::Integer(*i)),
            (Self::Integer(i), FieldKind::Float) => Some(FieldValue::Float(*i as f64)),
            (Self::Integer(i), FieldKind::Text) => Some(FieldValue::Text(i.to_string())),
            (Self::Integer(_), FieldKind::Bool) => None,

            (Self::Float(x), FieldKind::Float) => Some(FieldValue::Float(*x)),
            (Self::Float(x), FieldKind::Integer) if x.fract() == 0.0 => {
                Some(FieldValue::Integer(*x as i64))
            }
            (Self::Float(_), FieldKind::Integer) => None,
            (Self::Float(x), FieldKind::Text) => Some(FieldValue::Text(x.to_string())),
            (Self::Float(_), FieldKind::Bool) => None,

            (Self::Boolean(b), FieldKind::Bool) => Some(FieldValue::Bool(*b)),
            (Self::Boolean(b), FieldKind::Text) => Some(FieldValue::Text(b.to_string())),
            (Self::Boolean(_), _) => None,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<FieldValue> for FilterValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Self::Null,
            FieldValue::Bool(b) => Self::Boolean(b),
            FieldValue::Integer(i) => Self::Integer(i),
            FieldValue::Float(x) => Self::Float(x),
            FieldValue::Text(s) => Self::String(s),
        }
    }
}

/// Which rows, which page.
///
/// `page` is 1-based. Out-of-range `page`/`limit` values are clamped by the
/// engine rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Equality constraints, combined with logical AND.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FilterValue>,
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl QueryFilter {
    /// An unconstrained filter for the first page.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            page: default_page(),
            limit: default_limit(),
        }
    }

    /// Add an equality constraint.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Build a filter from raw request parameters.
    ///
    /// `page` and `limit` are pulled out; every other key becomes a string
    /// constraint. Unparsable `page`/`limit` values fall back to defaults,
    /// and `limit` is clamped to `config.max_limit`.
    pub fn from_params(params: HashMap<String, String>, config: &QueryConfig) -> Self {
        let mut filter = Self {
            fields: BTreeMap::new(),
            page: default_page(),
            limit: config.default_limit,
        };

        for (key, value) in params {
            match key.as_str() {
                PAGE_PARAM => {
                    filter.page = parse_window_value(&value).unwrap_or_else(default_page);
                }
                LIMIT_PARAM => {
                    filter.limit = parse_window_value(&value).unwrap_or(config.default_limit);
                }
                _ => {
                    filter.fields.insert(key, FilterValue::String(value));
                }
            }
        }

        filter.limit = filter.limit.min(config.max_limit);
        filter
    }

    /// The clamped page window this filter selects.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Negative numbers clamp to zero, which the page window then lifts to 1.
fn parse_window_value(raw: &str) -> Option<u64> {
    let n: i64 = raw.trim().parse().ok()?;
    Some(n.max(0) as u64)
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_params_extracts_window() {
        let cfg = QueryConfig::default();
        let filter = QueryFilter::from_params(
            params(&[("login", "alice"), ("page", "3"), ("limit", "5")]),
            &cfg,
        );
        assert_eq!(filter.page, 3);
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.fields.len(), 1);
        assert_eq!(filter.fields["login"], FilterValue::from("alice"));
    }

    #[test]
    fn test_from_params_defaults_and_clamps() {
        let cfg = QueryConfig::default();
        let filter = QueryFilter::from_params(params(&[("page", "x"), ("limit", "5000")]), &cfg);
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, cfg.max_limit);

        let filter = QueryFilter::from_params(params(&[("limit", "nope")]), &cfg);
        assert_eq!(filter.limit, cfg.default_limit);

        let filter = QueryFilter::from_params(params(&[("page", "-4"), ("limit", "0")]), &cfg);
        assert_eq!(filter.page_request().page, 1);
        assert_eq!(filter.page_request().page_size, 1);
    }

    #[test]
    fn test_coerce_string_to_kinds() {
        let v = FilterValue::from(" 42 ");
        assert_eq!(v.coerce(FieldKind::Integer), Some(FieldValue::Integer(42)));
        assert_eq!(v.coerce(FieldKind::Float), Some(FieldValue::Float(42.0)));
        assert_eq!(v.coerce(FieldKind::Text), Some(FieldValue::Text(" 42 ".into())));
        assert_eq!(v.coerce(FieldKind::Bool), None);

        assert_eq!(
            FilterValue::from("TRUE").coerce(FieldKind::Bool),
            Some(FieldValue::Bool(true))
        );
        assert_eq!(FilterValue::from("abc").coerce(FieldKind::Integer), None);
    }

    #[test]
    fn test_coerce_typed_values() {
        assert_eq!(
            FilterValue::Float(3.0).coerce(FieldKind::Integer),
            Some(FieldValue::Integer(3))
        );
        assert_eq!(FilterValue::Float(3.5).coerce(FieldKind::Integer), None);
        assert_eq!(FilterValue::Boolean(true).coerce(FieldKind::Integer), None);
        assert_eq!(
            FilterValue::Null.coerce(FieldKind::Text),
            Some(FieldValue::Null)
        );
    }

    #[test]
    fn test_json_shape() {
        let filter: QueryFilter =
            serde_json::from_str(r#"{"login":"bob","active":true,"limit":5}"#).expect("parse");
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.fields["active"], FilterValue::Boolean(true));
    }
}
