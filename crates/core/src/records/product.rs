//! Product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{ResourceRecord, json_field_text};
use crate::records::decimal_flex;
use crate::types::ResourceId;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ResourceId,
    pub name: String,
    #[serde(deserialize_with = "decimal_flex::deserialize")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The category a product belongs to, as embedded in product payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: ResourceId,
    pub name: String,
}

impl ResourceRecord for Product {
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
    fn test_price_accepts_number_and_string() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "name": "Mug", "price": 10.5}))
                .expect("numeric price");
        assert_eq!(product.price.to_string(), "10.5");

        let product: Product =
            serde_json::from_value(json!({"id": 1, "name": "Mug", "price": "10.50"}))
                .expect("string price");
        assert_eq!(product.price.to_string(), "10.50");
    }

    #[test]
    fn test_field_text_reaches_nested_category() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "name": "Mug",
            "price": 10,
            "category": {"id": 3, "name": "Kitchen"}
        }))
        .expect("product");

        assert_eq!(
            product.field_text("category.name"),
            Some("Kitchen".to_string())
        );
        assert_eq!(product.field_text("name"), Some("Mug".to_string()));
        assert_eq!(product.field_text("description"), None);
    }
}
