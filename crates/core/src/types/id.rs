//! Resource identifiers.
//!
//! Backend IDs are integers for most resource kinds, but some payloads carry
//! them as strings. `ResourceId` accepts both at the serde boundary so a
//! single ID type works for every kind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single CRUD-managed resource.
///
/// Equality is representation-sensitive: `Int(7)` and `Str("7")` are
/// different IDs. The REST client normalizes each resource kind to one
/// representation, so mixed comparisons never happen in practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric ID (the common case).
    Int(i64),
    /// String ID (e.g., externally issued keys).
    Str(String),
}

impl ResourceId {
    /// Get the numeric value, if this is a numeric ID.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(id) => Some(*id),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Str(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_both_representations() {
        let id: ResourceId = serde_json::from_str("7").expect("int id");
        assert_eq!(id, ResourceId::Int(7));

        let id: ResourceId = serde_json::from_str("\"ord-7\"").expect("str id");
        assert_eq!(id, ResourceId::Str("ord-7".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceId::Int(42).to_string(), "42");
        assert_eq!(ResourceId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_representations_are_distinct() {
        assert_ne!(ResourceId::Int(7), ResourceId::from("7"));
    }
}
