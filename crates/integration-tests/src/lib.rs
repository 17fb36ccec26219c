//! Test support for driving the console crates against an in-process
//! stub of the Xomo backend.
//!
//! [`StubBackend`] serves the slice of the REST surface the console
//! talks to, backed by in-memory state, and reproduces the backend's
//! real quirks: per-route response envelopes (bare array, `{"data"}`,
//! `{"content"}`), `{"message"}` error bodies, bearer-token auth, and
//! the split `/user/admin/all` vs `/user/{id}` routing.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use xomo_admin_console::client::ResourceRoutes;
use xomo_admin_console::{RestClient, SessionContext};
use xomo_admin_core::ResourceRecord;

/// The bearer token [`BackendState::requiring_token`] accepts.
pub const TEST_TOKEN: &str = "test-admin-token";

/// In-memory backend state, shared with spawned handlers.
///
/// Records are stored as raw JSON so tests can seed the exact payload
/// shapes the real backend emits, aliases and all.
#[derive(Debug, Default)]
pub struct BackendState {
    required_token: Mutex<Option<String>>,
    pub products: Mutex<Vec<Value>>,
    pub orders: Mutex<Vec<Value>>,
    pub users: Mutex<Vec<Value>>,
}

impl BackendState {
    /// State that rejects requests without `Bearer` [`TEST_TOKEN`].
    #[must_use]
    pub fn requiring_token() -> Self {
        let state = Self::default();
        state.set_required_token(Some(TEST_TOKEN));
        state
    }

    /// Change the accepted token while the server is running.
    pub fn set_required_token(&self, token: Option<&str>) {
        *lock_opt(&self.required_token) = token.map(String::from);
    }
}

/// An in-process Xomo backend bound to an ephemeral port.
#[derive(Debug)]
pub struct StubBackend {
    pub base_url: Url,
    pub state: Arc<BackendState>,
    server: tokio::task::JoinHandle<()>,
}

impl StubBackend {
    /// Bind a listener on a free port and serve `state`.
    pub async fn spawn(state: BackendState) -> Self {
        let state = Arc::new(state);
        let app = router(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let base_url = Url::parse(&format!("http://{addr}/")).expect("stub base url");
        Self {
            base_url,
            state,
            server,
        }
    }

    /// A [`RestClient`] for `routes`, pointed at this backend.
    #[must_use]
    pub fn client<R: ResourceRecord>(
        &self,
        routes: ResourceRoutes,
        session: SessionContext,
    ) -> RestClient<R> {
        RestClient::new(
            reqwest::Client::new(),
            self.base_url.clone(),
            session,
            routes,
        )
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A session already holding [`TEST_TOKEN`].
#[must_use]
pub fn authed_session() -> SessionContext {
    let session = SessionContext::new();
    session.hydrate(Some(SecretString::from(TEST_TOKEN.to_string())), None);
    session
}

// ---------------------------------------------------------------------------
// Fixture payloads
// ---------------------------------------------------------------------------

#[must_use]
pub fn product_json(id: i64, name: &str, price: f64) -> Value {
    json!({"id": id, "name": name, "price": price})
}

#[must_use]
pub fn order_json(id: i64, status: &str, total: f64) -> Value {
    // The list endpoint spells the total `totalAmount`.
    json!({"id": id, "status": status, "totalAmount": total})
}

#[must_use]
pub fn user_json(id: i64, email: &str, roles: &[&str]) -> Value {
    json!({"id": id, "email": email, "fullName": "Test User", "roles": roles})
}

// ---------------------------------------------------------------------------
// Routes and handlers
// ---------------------------------------------------------------------------

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", delete(delete_product))
        .route("/orders", get(list_orders))
        .route("/orders/{id}/status", put(put_order_status))
        .route("/user/admin/all", get(list_users))
        .route("/user/{id}", delete(delete_user))
        .route("/user/{id}/roles", put(put_user_roles))
        .with_state(state)
}

fn lock(records: &Mutex<Vec<Value>>) -> MutexGuard<'_, Vec<Value>> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}

fn lock_opt(token: &Mutex<Option<String>>) -> MutexGuard<'_, Option<String>> {
    token.lock().unwrap_or_else(PoisonError::into_inner)
}

fn authorize(state: &BackendState, headers: &HeaderMap) -> Result<(), Response> {
    let required = lock_opt(&state.required_token);
    let Some(required) = required.as_deref() else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(required) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid or expired token",
        ))
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"message": message}))).into_response()
}

fn id_matches(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::Number(n)) => n.to_string() == id,
        Some(Value::String(s)) => s == id,
        _ => false,
    }
}

/// `GET /products` answers with a bare JSON array.
async fn list_products(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(Value::Array(lock(&state.products).clone())).into_response()
}

async fn delete_product(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut products = lock(&state.products);
    let before = products.len();
    products.retain(|record| !id_matches(record, &id));
    if products.len() == before {
        error_response(StatusCode::NOT_FOUND, "Product not found")
    } else {
        StatusCode::OK.into_response()
    }
}

/// `GET /orders` wraps the collection in `{"data": [...]}`.
async fn list_orders(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"data": lock(&state.orders).clone()})).into_response()
}

/// `PUT /orders/{id}/status` echoes the updated order back.
async fn put_order_status(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let Some(status) = body.get("status").and_then(Value::as_str).map(String::from) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing status");
    };
    let mut orders = lock(&state.orders);
    match orders.iter_mut().find(|record| id_matches(record, &id)) {
        Some(order) => {
            if let Some(obj) = order.as_object_mut() {
                obj.insert("status".to_string(), Value::String(status));
            }
            Json(order.clone()).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "Order not found"),
    }
}

/// `GET /user/admin/all` wraps the collection in `{"content": [...]}`.
async fn list_users(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"content": lock(&state.users).clone()})).into_response()
}

async fn delete_user(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut users = lock(&state.users);
    let before = users.len();
    users.retain(|record| !id_matches(record, &id));
    if users.len() == before {
        error_response(StatusCode::NOT_FOUND, "User not found")
    } else {
        StatusCode::OK.into_response()
    }
}

/// `PUT /user/{id}/roles` acks with an empty body, no record echo.
async fn put_user_roles(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let Some(roles) = body.get("roles").cloned() else {
        return error_response(StatusCode::BAD_REQUEST, "Missing roles");
    };
    let mut users = lock(&state.users);
    match users.iter_mut().find(|record| id_matches(record, &id)) {
        Some(user) => {
            if let Some(obj) = user.as_object_mut() {
                obj.insert("roles".to_string(), roles);
            }
            StatusCode::OK.into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "User not found"),
    }
}
