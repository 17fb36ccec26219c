//! Customer inquiry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ResourceRecord, json_field_text};
use crate::types::ResourceId;

/// A customer contact-form inquiry.
///
/// The contact endpoint has drifted over time: the sender name is `name` or
/// `fullName`, the body is `message` or `query`, and the submission time is
/// `createdAt`, `date`, or `submittedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: ResourceId,
    #[serde(default, alias = "fullName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        alias = "phoneNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, alias = "query", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        alias = "date",
        alias = "submittedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl ResourceRecord for Inquiry {
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

    #[test]
    fn test_drifted_field_names() {
        let inquiry: Inquiry = serde_json::from_value(json!({
            "id": 3,
            "fullName": "Ada Lovelace",
            "phoneNumber": "555-0100",
            "query": "Where is my order?",
            "submittedAt": "2025-06-01T12:00:00Z"
        }))
        .expect("inquiry");

        assert_eq!(inquiry.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(inquiry.phone.as_deref(), Some("555-0100"));
        assert_eq!(inquiry.message.as_deref(), Some("Where is my order?"));
        assert!(inquiry.created_at.is_some());
    }
}
