//! User records.

use serde::{Deserialize, Serialize};

use crate::record::{ResourceRecord, json_field_text};
use crate::types::{ResourceId, Role};

/// A registered user (customer or staff).
///
/// Older user payloads spell the display name `fullName` or `Name`; roles
/// arrive in the shapes normalized by [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "fullName",
        alias = "Name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "phoneNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// A user's postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl User {
    /// Whether any of the user's roles grants admin access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(Role::is_admin)
    }
}

impl ResourceRecord for User {
    fn id(&self) -> ResourceId {
        self.id.clone()
    }

    fn field_text(&self, path: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        json_field_text(&value, path)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Role;

    #[test]
    fn test_name_aliases() {
        for key in ["name", "fullName", "Name"] {
            let user: User = serde_json::from_value(json!({"id": 1, key: "Ada"}))
                .unwrap_or_else(|e| panic!("user with {key}: {e}"));
            assert_eq!(user.name.as_deref(), Some("Ada"));
        }
    }

    #[test]
    fn test_mixed_role_shapes() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "email": "ada@example.com",
            "roles": ["ROLE_USER", {"id": 2, "name": "ROLE_ADMIN"}]
        }))
        .expect("user");
        assert_eq!(user.roles, vec![Role::User, Role::Admin]);
        assert!(user.is_admin());
    }

    #[test]
    fn test_roles_searchable_as_text() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "roles": [{"name": "ROLE_ADMIN"}]
        }))
        .expect("user");
        assert_eq!(user.field_text("roles"), Some("ROLE_ADMIN".to_string()));
    }
}
