//! Per-resource-kind URL shapes.
//!
//! The backend's routing is inconsistent and the inconsistencies must be
//! preserved for compatibility: users list at `/user/admin/all` but live at
//! `/user/{id}`, products create via multipart `POST /products/add`, home
//! ads carry their image as a base64 string field. Each kind captures its
//! own shape here; the client never special-cases kinds.

/// How a kind's create/update payload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStyle {
    /// Plain JSON body to the collection path.
    Json,
    /// Multipart body to a dedicated path: a `data` part with the record
    /// JSON and an optional `image` file part.
    Multipart { path: &'static str },
    /// Plain JSON body with the image base64-encoded into a named field.
    JsonBase64Image { field: &'static str },
}

/// URL shapes and patch routes for one resource kind.
#[derive(Debug, Clone)]
pub struct ResourceRoutes {
    /// Kind name, used in log events and error messages.
    pub kind: &'static str,
    /// Collection path for list (and JSON create).
    pub list_path: &'static str,
    /// Base path single items hang off (`{item_base}/{id}`).
    pub item_base: &'static str,
    /// Create/update payload encoding.
    pub create: CreateStyle,
    /// Field name → path suffix for single-field mutations
    /// (`PUT {item_base}/{id}/{suffix}`).
    pub patch_suffixes: &'static [(&'static str, &'static str)],
}

impl ResourceRoutes {
    /// Path of a single item.
    #[must_use]
    pub fn item_path(&self, id: &xomo_admin_core::ResourceId) -> String {
        format!("{}/{id}", self.item_base)
    }

    /// The patch path suffix bound for a field, if any.
    #[must_use]
    pub fn patch_suffix(&self, field: &str) -> Option<&'static str> {
        self.patch_suffixes
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, suffix)| *suffix)
    }
}

#[cfg(test)]
mod tests {
    use xomo_admin_core::ResourceId;

    use super::*;

    #[test]
    fn test_item_path_and_patch_suffix() {
        let routes = ResourceRoutes {
            kind: "orders",
            list_path: "/orders",
            item_base: "/orders",
            create: CreateStyle::Json,
            patch_suffixes: &[("status", "status")],
        };
        assert_eq!(routes.item_path(&ResourceId::Int(5)), "/orders/5");
        assert_eq!(routes.patch_suffix("status"), Some("status"));
        assert_eq!(routes.patch_suffix("total"), None);
    }
}
