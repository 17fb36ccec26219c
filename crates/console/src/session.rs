//! Session and auth state shared across the console.
//!
//! Views and the REST client never read persisted storage directly; they
//! hold a [`SessionContext`], hydrated once at startup and cleared on
//! logout. The context answers the three questions the console asks:
//! "what token do requests carry", "is anyone signed in", and "is the
//! signed-in user an admin".

use std::sync::{Arc, PoisonError, RwLock};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use xomo_admin_core::{ResourceId, Role};

/// The signed-in staff member, as persisted at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAdmin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, alias = "fullName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
}

/// Injected session/auth collaborator.
///
/// Cheaply cloneable; all clones share the same state, so the REST client
/// can read the token concurrently with a login hydrating it.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

#[derive(Debug, Default)]
struct SessionInner {
    token: RwLock<Option<SecretString>>,
    admin: RwLock<Option<CurrentAdmin>>,
}

impl SessionContext {
    /// Create an empty (signed-out) session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from persisted storage at startup or after login.
    pub fn hydrate(&self, token: Option<SecretString>, admin: Option<CurrentAdmin>) {
        *write_lock(&self.inner.token) = token;
        *write_lock(&self.inner.admin) = admin;
    }

    /// Clear all session state on logout.
    pub fn clear(&self) {
        self.hydrate(None, None);
    }

    /// The bearer token requests carry, if signed in.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        read_lock(&self.inner.token)
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }

    /// Whether a session token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        read_lock(&self.inner.token).is_some()
    }

    /// The stored admin profile, if hydrated.
    #[must_use]
    pub fn current_admin(&self) -> Option<CurrentAdmin> {
        read_lock(&self.inner.admin).clone()
    }

    /// Whether the signed-in user has an admin role.
    ///
    /// Prefers the stored login profile; falls back to the token's JWT
    /// claims, which the backend spells as `roles`, `authorities`, or
    /// `role`, holding strings, `{name}` objects, or a bare string.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        if let Some(admin) = self.current_admin() {
            return admin.roles.iter().any(Role::is_admin);
        }
        self.bearer_token()
            .and_then(|token| jwt_claims(&token))
            .is_some_and(|claims| claims_grant_admin(&claims))
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Decode the claims segment of a JWT without verifying the signature.
///
/// Verification is the backend's job; the console only mirrors what the
/// backend issued to decide which screens to offer.
fn jwt_claims(token: &str) -> Option<serde_json::Value> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn claims_grant_admin(claims: &serde_json::Value) -> bool {
    let claim = claims
        .get("roles")
        .or_else(|| claims.get("authorities"))
        .or_else(|| claims.get("role"));
    match claim {
        Some(serde_json::Value::Array(items)) => items.iter().any(|item| {
            claim_name(item).is_some_and(|name| name.to_uppercase().contains("ADMIN"))
        }),
        Some(serde_json::Value::String(name)) => name.to_uppercase().contains("ADMIN"),
        _ => false,
    }
}

fn claim_name(item: &serde_json::Value) -> Option<&str> {
    match item {
        serde_json::Value::String(name) => Some(name),
        serde_json::Value::Object(obj) => obj.get("name").and_then(serde_json::Value::as_str),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn token_with_claims(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn test_empty_session() {
        let session = SessionContext::new();
        assert!(!session.is_authenticated());
        assert!(!session.is_admin());
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn test_hydrate_and_clear() {
        let session = SessionContext::new();
        session.hydrate(Some(SecretString::from("tok")), None);
        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token().as_deref(), Some("tok"));

        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_stored_profile_preferred_over_token() {
        let session = SessionContext::new();
        let admin = CurrentAdmin {
            id: Some(ResourceId::Int(1)),
            email: Some("staff@example.com".to_string()),
            name: None,
            roles: vec![Role::Admin],
        };
        // Token with no admin claim; profile says admin.
        let token = token_with_claims(&json!({"sub": "staff", "roles": ["ROLE_USER"]}));
        session.hydrate(Some(SecretString::from(token)), Some(admin));
        assert!(session.is_admin());
    }

    #[test]
    fn test_claim_shapes() {
        let cases = [
            json!({"roles": ["ROLE_ADMIN"]}),
            json!({"roles": [{"name": "ROLE_ADMIN"}]}),
            json!({"authorities": ["ADMIN"]}),
            json!({"role": "ROLE_ADMIN"}),
        ];
        for claims in cases {
            let session = SessionContext::new();
            session.hydrate(Some(SecretString::from(token_with_claims(&claims))), None);
            assert!(session.is_admin(), "claims should grant admin: {claims}");
        }

        let session = SessionContext::new();
        let token = token_with_claims(&json!({"roles": ["ROLE_USER"]}));
        session.hydrate(Some(SecretString::from(token)), None);
        assert!(!session.is_admin());
    }

    #[test]
    fn test_malformed_token_is_not_admin() {
        let session = SessionContext::new();
        session.hydrate(Some(SecretString::from("not-a-jwt")), None);
        assert!(!session.is_admin());
    }
}
