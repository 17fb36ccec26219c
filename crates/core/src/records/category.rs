//! Category records.

use serde::{Deserialize, Serialize};

use crate::record::{ResourceRecord, json_field_text};
use crate::types::ResourceId;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ResourceId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceRecord for Category {
    fn id(&self) -> ResourceId {
        self.id.clone()
    }

    fn field_text(&self, path: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        json_field_text(&value, path)
    }
}
