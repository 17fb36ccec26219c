//! REST API client for the Xomo backend.
//!
//! [`ResourceClient`] is the abstract collaborator the list controller
//! drives; [`RestClient`] binds it to the backend's REST shape for one
//! resource kind, described by a [`ResourceRoutes`] table. All requests
//! carry the bearer token from the injected [`SessionContext`].

use std::marker::PhantomData;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::instrument;
use url::Url;
use xomo_admin_core::{ResourceId, ResourceRecord};

use crate::error::ApiError;
use crate::session::SessionContext;

mod envelope;
mod routes;

pub use routes::{CreateStyle, ResourceRoutes};

/// Abstract client for one resource kind.
///
/// The controller consumes only this subset of the REST surface; the
/// concrete [`RestClient`] adds `get`/`create`/`update` for form screens.
/// Implementations are used through generics, so the trait keeps native
/// `async fn` methods.
#[allow(async_fn_in_trait)]
pub trait ResourceClient {
    type Resource: ResourceRecord;

    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<Self::Resource>, ApiError>;

    /// Delete one resource.
    async fn remove(&self, id: &ResourceId) -> Result<(), ApiError>;

    /// Mutate named fields of one resource.
    ///
    /// Returns the server's updated representation when the backend sends
    /// one back, `None` when it acks without a body.
    async fn patch(
        &self,
        id: &ResourceId,
        partial: &Map<String, Value>,
    ) -> Result<Option<Self::Resource>, ApiError>;
}

/// An image file attached to a create/update call.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// REST binding of [`ResourceClient`] for one resource kind.
///
/// Cheaply cloneable; clones share the HTTP connection pool and session.
#[derive(Debug)]
pub struct RestClient<R> {
    inner: Arc<RestClientInner>,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for RestClient<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

#[derive(Debug)]
struct RestClientInner {
    http: reqwest::Client,
    base_url: Url,
    session: SessionContext,
    routes: ResourceRoutes,
}

impl<R: ResourceRecord> RestClient<R> {
    /// Create a client for one resource kind.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        base_url: Url,
        session: SessionContext,
        routes: ResourceRoutes,
    ) -> Self {
        Self {
            inner: Arc::new(RestClientInner {
                http,
                base_url,
                session,
                routes,
            }),
            _marker: PhantomData,
        }
    }

    /// The route table this client is bound to.
    #[must_use]
    pub fn routes(&self) -> &ResourceRoutes {
        &self.inner.routes
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.inner.http.request(method, url);
        match self.inner.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Fetch one resource by ID.
    #[instrument(skip(self), fields(kind = self.inner.routes.kind))]
    pub async fn get(&self, id: &ResourceId) -> Result<R, ApiError> {
        let url = self.url(&self.inner.routes.item_path(id))?;
        let resp = self.request(Method::GET, url).send().await?;
        let resp = check_status(resp, self.inner.routes.kind).await?;
        Ok(serde_json::from_value(resp.json::<Value>().await?)?)
    }

    /// Create a resource, with an optional image attachment.
    ///
    /// The payload encoding (JSON, multipart `data`+`image` parts, or a
    /// base64 image field) follows the kind's route table; the asymmetry is
    /// the backend's and is preserved per kind.
    #[instrument(skip(self, record, image), fields(kind = self.inner.routes.kind))]
    pub async fn create(&self, record: &R, image: Option<&ImageUpload>) -> Result<R, ApiError> {
        let resp = match self.inner.routes.create {
            CreateStyle::Json => {
                let url = self.url(self.inner.routes.list_path)?;
                self.request(Method::POST, url).json(record).send().await?
            }
            CreateStyle::Multipart { path } => {
                let url = self.url(path)?;
                let form = multipart_form(record, image)?;
                self.request(Method::POST, url)
                    .multipart(form)
                    .send()
                    .await?
            }
            CreateStyle::JsonBase64Image { field } => {
                let url = self.url(self.inner.routes.list_path)?;
                let body = with_base64_image(record, field, image)?;
                self.request(Method::POST, url).json(&body).send().await?
            }
        };
        let resp = check_status(resp, self.inner.routes.kind).await?;
        Ok(serde_json::from_value(resp.json::<Value>().await?)?)
    }

    /// Replace a resource, with an optional image attachment.
    #[instrument(skip(self, record, image), fields(kind = self.inner.routes.kind))]
    pub async fn update(
        &self,
        id: &ResourceId,
        record: &R,
        image: Option<&ImageUpload>,
    ) -> Result<R, ApiError> {
        let url = self.url(&self.inner.routes.item_path(id))?;
        let resp = match self.inner.routes.create {
            CreateStyle::Multipart { .. } => {
                let form = multipart_form(record, image)?;
                self.request(Method::PUT, url).multipart(form).send().await?
            }
            CreateStyle::JsonBase64Image { field } => {
                let body = with_base64_image(record, field, image)?;
                self.request(Method::PUT, url).json(&body).send().await?
            }
            CreateStyle::Json => self.request(Method::PUT, url).json(record).send().await?,
        };
        let resp = check_status(resp, self.inner.routes.kind).await?;
        Ok(serde_json::from_value(resp.json::<Value>().await?)?)
    }

    /// Mutate a single field through its dedicated route
    /// (`PUT {item}/{id}/{suffix}`).
    #[instrument(skip(self, value), fields(kind = self.inner.routes.kind))]
    pub async fn patch_field(
        &self,
        id: &ResourceId,
        field: &str,
        value: Value,
    ) -> Result<Option<R>, ApiError> {
        let mut partial = Map::new();
        partial.insert(field.to_string(), value);
        ResourceClient::patch(self, id, &partial).await
    }
}

impl<R: ResourceRecord> ResourceClient for RestClient<R> {
    type Resource = R;

    #[instrument(skip(self), fields(kind = self.inner.routes.kind))]
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        let url = self.url(self.inner.routes.list_path)?;
        let resp = self.request(Method::GET, url).send().await?;
        let resp = check_status(resp, self.inner.routes.kind).await?;
        let items = envelope::unwrap_list(resp.json().await?)?;
        Ok(serde_json::from_value(Value::Array(items))?)
    }

    #[instrument(skip(self), fields(kind = self.inner.routes.kind))]
    async fn remove(&self, id: &ResourceId) -> Result<(), ApiError> {
        let url = self.url(&self.inner.routes.item_path(id))?;
        let resp = self.request(Method::DELETE, url).send().await?;
        check_status(resp, self.inner.routes.kind).await?;
        Ok(())
    }

    #[instrument(skip(self, partial), fields(kind = self.inner.routes.kind))]
    async fn patch(
        &self,
        id: &ResourceId,
        partial: &Map<String, Value>,
    ) -> Result<Option<R>, ApiError> {
        let mut fields = partial.keys();
        let field = match (fields.next(), fields.next()) {
            (Some(field), None) => field,
            _ => {
                return Err(ApiError::UnsupportedPatch(
                    "patch requires exactly one field".to_string(),
                ));
            }
        };
        let suffix = self
            .inner
            .routes
            .patch_suffix(field)
            .ok_or_else(|| ApiError::UnsupportedPatch(field.clone()))?;

        let path = format!("{}/{suffix}", self.inner.routes.item_path(id));
        let url = self.url(&path)?;
        let resp = self.request(Method::PUT, url).json(partial).send().await?;
        let resp = check_status(resp, self.inner.routes.kind).await?;

        // Some endpoints echo the updated record, others ack with a plain
        // message body; only a parseable record is merged by the caller.
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body).ok())
    }
}

/// Map a non-success response to an [`ApiError`], preferring the backend's
/// `{"message": ...}` body over the canonical status reason.
async fn check_status(
    resp: reqwest::Response,
    kind: &'static str,
) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    match status.as_u16() {
        401 | 403 => Err(ApiError::Unauthorized(message)),
        404 => Err(ApiError::NotFound(format!("{kind}: {message}"))),
        code => Err(ApiError::Api {
            status: code,
            message,
        }),
    }
}

fn multipart_form<R: ResourceRecord>(
    record: &R,
    image: Option<&ImageUpload>,
) -> Result<reqwest::multipart::Form, ApiError> {
    let data = serde_json::to_string(record)?;
    let mut form = reqwest::multipart::Form::new().text("data", data);
    if let Some(image) = image {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        form = form.part("image", part);
    }
    Ok(form)
}

fn with_base64_image<R: ResourceRecord>(
    record: &R,
    field: &str,
    image: Option<&ImageUpload>,
) -> Result<Value, ApiError> {
    let mut value = serde_json::to_value(record)?;
    if let (Some(obj), Some(image)) = (value.as_object_mut(), image) {
        obj.insert(field.to_string(), Value::String(BASE64.encode(&image.bytes)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use xomo_admin_core::Product;

    use super::*;

    #[test]
    fn test_with_base64_image_adds_field() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "name": "Mug", "price": 10}))
                .expect("product");
        let image = ImageUpload {
            file_name: "mug.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let body = with_base64_image(&product, "imageBase64", Some(&image)).expect("body");
        assert_eq!(body["imageBase64"], json!(BASE64.encode([1, 2, 3])));
        assert_eq!(body["name"], json!("Mug"));
    }

    #[test]
    fn test_with_base64_image_without_image() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "name": "Mug", "price": 10}))
                .expect("product");
        let body = with_base64_image(&product, "imageBase64", None).expect("body");
        assert!(body.get("imageBase64").is_none());
    }
}
