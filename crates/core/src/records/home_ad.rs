//! Promotional home-ad records.

use serde::{Deserialize, Serialize};

use crate::record::{ResourceRecord, json_field_text};
use crate::types::ResourceId;

/// A promotional ad shown on the storefront home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeAd {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

impl ResourceRecord for HomeAd {
    fn id(&self) -> ResourceId {
        self.id.clone()
    }

    fn field_text(&self, path: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        json_field_text(&value, path)
    }
}
