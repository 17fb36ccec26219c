//! Route tables and list configurations for each resource kind.
//!
//! These capture, per kind, what the screens search on, what their table
//! headers sort by, and the exact URL shapes of the backend (including its
//! inconsistencies, which are preserved, not unified).

use rust_decimal::prelude::ToPrimitive;
use xomo_admin_core::{Category, HomeAd, Inquiry, Order, Product, ResourceId, SortKey, User};

use crate::client::{CreateStyle, ResourceRoutes};
use crate::controller::ListConfig;

#[allow(clippy::cast_precision_loss)]
fn numeric_id(id: &ResourceId) -> Option<SortKey> {
    match id {
        ResourceId::Int(i) => Some(SortKey::Number(*i as f64)),
        ResourceId::Str(s) => s.parse().ok().map(SortKey::Number),
    }
}

/// Catalog products: multipart create with an `image` part.
pub mod products {
    use super::*;

    #[must_use]
    pub const fn routes() -> ResourceRoutes {
        ResourceRoutes {
            kind: "products",
            list_path: "/products",
            item_base: "/products",
            create: CreateStyle::Multipart {
                path: "/products/add",
            },
            patch_suffixes: &[],
        }
    }

    #[must_use]
    pub fn list_config() -> ListConfig<Product> {
        ListConfig::new()
            .searchable("name")
            .searchable("description")
            .searchable("category.name")
            .sortable("name", |p: &Product| Some(SortKey::text(&p.name)))
            .sortable("price", |p| p.price.to_f64().map(SortKey::Number))
    }
}

/// Product categories: plain JSON CRUD.
pub mod categories {
    use super::*;

    #[must_use]
    pub const fn routes() -> ResourceRoutes {
        ResourceRoutes {
            kind: "categories",
            list_path: "/categories",
            item_base: "/categories",
            create: CreateStyle::Json,
            patch_suffixes: &[],
        }
    }

    #[must_use]
    pub fn list_config() -> ListConfig<Category> {
        ListConfig::new()
            .searchable("name")
            .searchable("description")
            .sortable("id", |c: &Category| numeric_id(&c.id))
            .sortable("name", |c| Some(SortKey::text(&c.name)))
    }
}

/// Customer orders: read-only except the inline status mutation.
pub mod orders {
    use super::*;

    #[must_use]
    pub const fn routes() -> ResourceRoutes {
        ResourceRoutes {
            kind: "orders",
            list_path: "/orders",
            item_base: "/orders",
            create: CreateStyle::Json,
            patch_suffixes: &[("status", "status")],
        }
    }

    #[must_use]
    pub fn list_config() -> ListConfig<Order> {
        ListConfig::new()
            .searchable("id")
            .searchable("user.email")
            .searchable("user.name")
            .searchable("status")
            .sortable("id", |o: &Order| numeric_id(&o.id))
            .sortable("total", |o| {
                o.total.as_ref().and_then(ToPrimitive::to_f64).map(SortKey::Number)
            })
            .sortable("status", |o| Some(SortKey::text(o.status.as_str())))
            .sortable("date", |o| o.created_at.map(SortKey::Timestamp))
    }
}

/// Registered users: list lives under `/user/admin/all`, items under
/// `/user/{id}`, roles mutate through `/user/{id}/roles`.
pub mod users {
    use super::*;

    #[must_use]
    pub const fn routes() -> ResourceRoutes {
        ResourceRoutes {
            kind: "users",
            list_path: "/user/admin/all",
            item_base: "/user",
            create: CreateStyle::Json,
            patch_suffixes: &[("roles", "roles")],
        }
    }

    #[must_use]
    pub fn list_config() -> ListConfig<User> {
        ListConfig::new()
            .searchable("id")
            .searchable("email")
            .searchable("name")
            .searchable("phone")
            .searchable("roles")
            .sortable("id", |u: &User| numeric_id(&u.id))
            .sortable("email", |u| {
                u.email.as_deref().map(SortKey::text)
            })
            .sortable("name", |u| u.name.as_deref().map(SortKey::text))
    }
}

/// Promotional home ads: JSON body with a base64-encoded image field.
pub mod home_ads {
    use super::*;

    #[must_use]
    pub const fn routes() -> ResourceRoutes {
        ResourceRoutes {
            kind: "home-ads",
            list_path: "/home-ads",
            item_base: "/home-ads",
            create: CreateStyle::JsonBase64Image {
                field: "imageBase64",
            },
            patch_suffixes: &[],
        }
    }

    #[must_use]
    pub fn list_config() -> ListConfig<HomeAd> {
        ListConfig::new()
            .searchable("title")
            .searchable("linkUrl")
            .sortable("title", |a: &HomeAd| a.title.as_deref().map(SortKey::text))
            .sortable("position", |a| {
                a.position.map(|p| SortKey::Number(f64::from(p)))
            })
    }
}

/// Customer inquiries: read-only list with the widest search surface.
pub mod inquiries {
    use super::*;

    #[must_use]
    pub const fn routes() -> ResourceRoutes {
        ResourceRoutes {
            kind: "queries",
            list_path: "/queries",
            item_base: "/queries",
            create: CreateStyle::Json,
            patch_suffixes: &[],
        }
    }

    #[must_use]
    pub fn list_config() -> ListConfig<Inquiry> {
        ListConfig::new()
            .searchable("id")
            .searchable("name")
            .searchable("email")
            .searchable("phone")
            .searchable("subject")
            .searchable("message")
            .sortable("id", |q: &Inquiry| numeric_id(&q.id))
            .sortable("name", |q| q.name.as_deref().map(SortKey::text))
            .sortable("email", |q| q.email.as_deref().map(SortKey::text))
            .sortable("phone", |q| q.phone.as_deref().map(SortKey::text))
            .sortable("subject", |q| q.subject.as_deref().map(SortKey::text))
            .sortable("date", |q| q.created_at.map(SortKey::Timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_routes_preserve_split_paths() {
        let routes = users::routes();
        assert_eq!(routes.list_path, "/user/admin/all");
        assert_eq!(routes.item_path(&ResourceId::Int(4)), "/user/4");
        assert_eq!(routes.patch_suffix("roles"), Some("roles"));
    }

    #[test]
    fn test_order_status_is_the_only_order_patch() {
        let routes = orders::routes();
        assert_eq!(routes.patch_suffix("status"), Some("status"));
        assert_eq!(routes.patch_suffix("total"), None);
    }

    #[test]
    fn test_numeric_id_parses_string_ids() {
        assert_eq!(
            numeric_id(&ResourceId::from("42")),
            Some(SortKey::Number(42.0))
        );
        assert_eq!(numeric_id(&ResourceId::from("ord-1")), None);
    }
}
