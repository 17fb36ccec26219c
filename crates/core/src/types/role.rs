//! User role normalization.
//!
//! The backend is inconsistent about how it serializes roles: plain strings
//! (`"ROLE_ADMIN"`, `"ADMIN"`), objects (`{"name": "ROLE_ADMIN"}`), and in
//! older user records numeric codes (0 = user, 1 = admin). All three shapes
//! deserialize into a single [`Role`] so nothing downstream branches on the
//! raw form.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A user role, normalized from the backend's various wire shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
    /// Any role name outside the two known ones, kept verbatim.
    Other(String),
}

impl Role {
    /// Normalize a role name string.
    ///
    /// Any name whose upper-cased form contains `ADMIN` is an admin role
    /// (`ROLE_ADMIN`, `ADMIN`, `SuperAdmin` all qualify).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_uppercase();
        if upper.contains("ADMIN") {
            Self::Admin
        } else if upper == "ROLE_USER" || upper == "USER" {
            Self::User
        } else {
            Self::Other(name.to_string())
        }
    }

    /// Whether this role grants admin access.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Canonical string form, always emitted on serialization.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::User => "ROLE_USER",
            Self::Other(name) => name,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::String(name) => Ok(Self::from_name(name)),
            serde_json::Value::Object(obj) => {
                let name = obj
                    .get("name")
                    .and_then(serde_json::Value::as_str)
                    .ok_or_else(|| de::Error::custom("role object without a name field"))?;
                Ok(Self::from_name(name))
            }
            serde_json::Value::Number(code) => match code.as_i64() {
                Some(1) => Ok(Self::Admin),
                Some(0) => Ok(Self::User),
                _ => Err(de::Error::custom(format!("unknown role code: {code}"))),
            },
            other => Err(de::Error::custom(format!(
                "unexpected role shape: {other}"
            ))),
        }
    }
}
