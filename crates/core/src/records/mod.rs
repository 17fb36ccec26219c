//! Normalized record structs, one per resource kind.
//!
//! The backend is inconsistent about field names (`totalPrice` vs
//! `totalAmount`, `fullName` vs `name`, `phoneNumber` vs `phone`) and about
//! value shapes (roles, money amounts). All of that is absorbed here with
//! serde aliases and custom deserializers; consumers only ever see these
//! structs.

mod category;
mod home_ad;
mod inquiry;
mod order;
mod product;
mod user;

pub use category::Category;
pub use home_ad::HomeAd;
pub use inquiry::Inquiry;
pub use order::{Order, OrderCustomer, OrderItem, OrderItemProduct};
pub use product::{CategoryRef, Product};
pub use user::{Address, User};

/// Money amounts arrive as JSON numbers from some endpoints and as strings
/// from others. These helpers accept both; serialization always emits the
/// string form (the `serde-with-str` default).
pub(crate) mod decimal_flex {
    use rust_decimal::Decimal;
    use serde::de::{self, Deserializer};
    use serde::Deserialize;
    use std::str::FromStr;

    fn from_value<E: de::Error>(value: &serde_json::Value) -> Result<Decimal, E> {
        match value {
            serde_json::Value::String(s) => {
                Decimal::from_str(s).map_err(|e| de::Error::custom(format!("invalid amount: {e}")))
            }
            serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
                .map_err(|e| de::Error::custom(format!("invalid amount: {e}"))),
            other => Err(de::Error::custom(format!(
                "expected a number or numeric string, got {other}"
            ))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        from_value(&value)
    }

    pub fn option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => from_value(&value).map(Some),
        }
    }
}
