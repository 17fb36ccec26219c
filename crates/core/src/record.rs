//! The record abstraction list controllers are generic over.
//!
//! A list controller never interprets field semantics beyond the `id`, the
//! searchable field paths, and the sortable field extractors supplied by its
//! caller. [`ResourceRecord`] is the seam that makes that possible for any
//! resource kind.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::ResourceId;

/// A single CRUD-managed record with a stable unique ID and named fields.
///
/// `field_text` resolves a dotted field path (e.g. `"category.name"`) to the
/// string form of the value, for case-insensitive substring search. Missing
/// fields resolve to `None` and are treated as empty by callers.
pub trait ResourceRecord: Clone + Serialize + DeserializeOwned {
    /// The record's unique identifier.
    fn id(&self) -> ResourceId;

    /// String form of the field at a dotted path, if present.
    fn field_text(&self, path: &str) -> Option<String>;
}

/// Comparable primitive produced by a sort-field extractor.
///
/// Extractors return `Option<SortKey>`; `None` orders before every `Some`,
/// so unset fields sort first in ascending order (the "smallest value" rule
/// for empty strings, zero, and epoch timestamps falls out of that).
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

impl SortKey {
    /// Case-folded text key.
    #[must_use]
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_lowercase())
    }

    const fn variant_rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Text(_) => 1,
            Self::Timestamp(_) => 2,
        }
    }

    /// Total ordering over keys.
    ///
    /// Same-variant keys compare on their value (`f64` via `total_cmp`);
    /// mixed variants compare on a fixed variant rank so an extractor that
    /// produces inconsistent variants still yields a deterministic order.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

/// Partial-merge failure.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The record did not serialize to a JSON object.
    #[error("record is not a JSON object")]
    NotAnObject,

    /// Serde round-trip failed.
    #[error("merge serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Merge a partial JSON object into a record.
///
/// The record is serialized to JSON, the partial's top-level keys overlay
/// the existing ones, and the result deserializes back into the record type.
/// Fields not named by the partial are untouched.
pub fn merge_partial<R: ResourceRecord>(
    record: &R,
    partial: &Map<String, Value>,
) -> Result<R, MergeError> {
    let mut value = serde_json::to_value(record)?;
    let obj = value.as_object_mut().ok_or(MergeError::NotAnObject)?;
    for (key, val) in partial {
        obj.insert(key.clone(), val.clone());
    }
    Ok(serde_json::from_value(value)?)
}

/// Resolve a dotted field path against a JSON value and render the result
/// as text.
///
/// Path segments traverse objects by key and arrays by numeric index.
/// Strings, numbers, and booleans render directly; arrays render as the
/// joined text of their elements (so e.g. a roles list is searchable);
/// null, objects, and missing paths resolve to `None`.
#[must_use]
pub fn json_field_text(value: &Value, path: &str) -> Option<String> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(obj) => obj.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    value_text(current)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::records::Product;

    #[test]
    fn test_json_field_text_nested_path() {
        let value = json!({"id": 1, "category": {"id": 3, "name": "Shoes"}});
        assert_eq!(
            json_field_text(&value, "category.name"),
            Some("Shoes".to_string())
        );
        assert_eq!(json_field_text(&value, "id"), Some("1".to_string()));
        assert_eq!(json_field_text(&value, "category.missing"), None);
        assert_eq!(json_field_text(&value, "missing.name"), None);
    }

    #[test]
    fn test_json_field_text_arrays() {
        let value = json!({"roles": ["ROLE_ADMIN", "ROLE_USER"]});
        assert_eq!(
            json_field_text(&value, "roles"),
            Some("ROLE_ADMIN, ROLE_USER".to_string())
        );
        assert_eq!(
            json_field_text(&value, "roles.1"),
            Some("ROLE_USER".to_string())
        );
    }

    #[test]
    fn test_sort_key_ordering() {
        assert_eq!(
            SortKey::Number(5.0).compare(&SortKey::Number(10.0)),
            Ordering::Less
        );
        // `text` case-folds, so "B" compares as "b": after "a", before "c".
        assert_eq!(
            SortKey::text("B").compare(&SortKey::text("a")),
            Ordering::Greater
        );
        assert_eq!(
            SortKey::text("B").compare(&SortKey::text("c")),
            Ordering::Less
        );
        assert_eq!(
            SortKey::text("B").compare(&SortKey::text("b")),
            Ordering::Equal
        );
        let earlier = SortKey::Timestamp(DateTime::UNIX_EPOCH);
        let later = SortKey::Timestamp(Utc::now());
        assert_eq!(earlier.compare(&later), Ordering::Less);
    }

    #[test]
    fn test_merge_partial_overlays_named_fields_only() {
        let product: Product = serde_json::from_value(json!({
            "id": 7, "name": "Mug", "price": "10.00"
        }))
        .expect("product");

        let mut partial = Map::new();
        partial.insert("name".to_string(), json!("Travel Mug"));
        let merged = merge_partial(&product, &partial).expect("merge");

        assert_eq!(merged.name, "Travel Mug");
        assert_eq!(merged.id, product.id);
        assert_eq!(merged.price, product.price);
    }
}
