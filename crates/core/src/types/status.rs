//! Order status.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Unknown values deserialize into `Other` so one unexpected status does not
/// fail an entire list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Orders arriving without a status render as pending.
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

impl OrderStatus {
    /// Wire-format string for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Other(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_round_trip() {
        let status: OrderStatus = serde_json::from_str("\"SHIPPED\"").expect("status");
        assert_eq!(status, OrderStatus::Shipped);
        assert_eq!(
            serde_json::to_string(&status).expect("json"),
            "\"SHIPPED\""
        );
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status: OrderStatus = serde_json::from_str("\"ON_HOLD\"").expect("status");
        assert_eq!(status, OrderStatus::Other("ON_HOLD".to_string()));
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
