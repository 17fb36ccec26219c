//! List-response envelope handling.
//!
//! Collection endpoints answer with a bare JSON array, `{"data": [...]}`,
//! or a paged `{"content": [...]}` depending on their age. Views never see
//! the difference; it is unwrapped here.

use serde_json::Value;

use crate::error::ApiError;

/// Unwrap a list response into its item array.
///
/// # Errors
///
/// Returns `ApiError::UnexpectedShape` for anything that is not one of the
/// three known envelopes.
pub fn unwrap_list(value: Value) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => {
            for key in ["data", "content"] {
                if let Some(Value::Array(items)) = obj.remove(key) {
                    return Ok(items);
                }
            }
            Err(ApiError::UnexpectedShape(
                "object without a data or content array".to_string(),
            ))
        }
        other => Err(ApiError::UnexpectedShape(format!(
            "expected an array, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unwraps_all_known_envelopes() {
        let bare = json!([{"id": 1}]);
        let data = json!({"data": [{"id": 1}]});
        let paged = json!({"content": [{"id": 1}], "totalPages": 3});
        for value in [bare, data, paged] {
            let items = unwrap_list(value).expect("items");
            assert_eq!(items.len(), 1);
        }
    }

    #[test]
    fn test_rejects_unknown_shapes() {
        assert!(unwrap_list(json!({"items": []})).is_err());
        assert!(unwrap_list(json!("nope")).is_err());
    }
}
