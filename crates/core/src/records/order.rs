//! Order records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{ResourceRecord, json_field_text};
use crate::records::decimal_flex;
use crate::types::{OrderStatus, ResourceId};

/// A customer order.
///
/// The backend names the order total differently per endpoint
/// (`totalPrice`, `totalAmount`, `total`); all three land in [`Self::total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<OrderCustomer>,
    #[serde(
        rename = "totalPrice",
        alias = "totalAmount",
        alias = "total",
        default,
        deserialize_with = "decimal_flex::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
}

/// The customer an order belongs to, as embedded in order payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, alias = "fullName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A line item on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<OrderItemProduct>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(
        default,
        deserialize_with = "decimal_flex::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
}

/// The product a line item refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
}

impl ResourceRecord for Order {
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
    fn test_total_field_aliases() {
        for key in ["totalPrice", "totalAmount", "total"] {
            let order: Order = serde_json::from_value(json!({"id": 1, key: 99.5}))
                .unwrap_or_else(|e| panic!("order with {key}: {e}"));
            assert_eq!(order.total.map(|t| t.to_string()), Some("99.5".to_string()));
        }
    }

    #[test]
    fn test_missing_status_defaults_to_pending() {
        let order: Order = serde_json::from_value(json!({"id": 1})).expect("order");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, None);
    }

    #[test]
    fn test_nested_customer_email_lookup() {
        let order: Order = serde_json::from_value(json!({
            "id": 1,
            "user": {"id": 9, "email": "a@example.com"},
            "status": "SHIPPED"
        }))
        .expect("order");
        assert_eq!(
            order.field_text("user.email"),
            Some("a@example.com".to_string())
        );
        assert_eq!(order.field_text("status"), Some("SHIPPED".to_string()));
    }
}
