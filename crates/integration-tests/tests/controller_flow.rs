//! End-to-end tests: the list controller driving the real REST client
//! against the stub backend, covering load/search/sort, delete
//! reconciliation, field patches, and session-expiry recovery.

use serde_json::{Map, Value, json};
use xomo_admin_console::{ErrorKind, ResourceListController, SessionContext, kinds};
use xomo_admin_core::{Order, OrderStatus, Product, ResourceId, Role, User};
use xomo_integration_tests::{
    BackendState, StubBackend, TEST_TOKEN, authed_session, order_json, product_json, user_json,
};

fn product_controller(
    backend: &StubBackend,
    session: SessionContext,
) -> ResourceListController<xomo_admin_console::RestClient<Product>> {
    let client = backend.client(kinds::products::routes(), session);
    ResourceListController::new(client, kinds::products::list_config())
}

#[tokio::test]
async fn test_load_search_and_sort_end_to_end() {
    let state = BackendState::default();
    *state.products.lock().expect("seed") = vec![
        product_json(1, "Coffee Mug", 12.0),
        product_json(2, "Tea Mug", 8.0),
        product_json(3, "Plate", 4.0),
    ];
    let backend = StubBackend::spawn(state).await;
    let controller = product_controller(&backend, SessionContext::new());

    controller.load().await.expect("load");
    assert_eq!(controller.working().len(), 3);

    controller.set_search_term("mug");
    let names: Vec<String> = controller.working().iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["Coffee Mug", "Tea Mug"]);

    controller.set_sort("price");
    let names: Vec<String> = controller.working().iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["Tea Mug", "Coffee Mug"]);

    controller.set_sort("price");
    let names: Vec<String> = controller.working().iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["Coffee Mug", "Tea Mug"]);
}

#[tokio::test]
async fn test_remove_reconciles_view_and_backend() {
    let state = BackendState::default();
    *state.products.lock().expect("seed") = vec![
        product_json(1, "Mug", 10.0),
        product_json(2, "Plate", 4.0),
    ];
    let backend = StubBackend::spawn(state).await;
    let controller = product_controller(&backend, SessionContext::new());
    controller.load().await.expect("load");

    controller
        .remove_resource(&ResourceId::Int(1))
        .await
        .expect("remove");

    let working = controller.working();
    assert_eq!(working.len(), 1);
    assert_eq!(working[0].id, ResourceId::Int(2));
    assert_eq!(backend.state.products.lock().expect("state").len(), 1);
}

#[tokio::test]
async fn test_remove_of_server_side_missing_record_keeps_collection() {
    let state = BackendState::default();
    *state.products.lock().expect("seed") = vec![product_json(1, "Mug", 10.0)];
    let backend = StubBackend::spawn(state).await;
    let controller = product_controller(&backend, SessionContext::new());
    controller.load().await.expect("load");

    // Another console deleted the record after our load.
    backend.state.products.lock().expect("state").clear();

    let err = controller
        .remove_resource(&ResourceId::Int(1))
        .await
        .expect_err("backend rejects the delete");

    assert_eq!(err.kind, ErrorKind::MutationFailure);
    assert_eq!(err.id, Some(ResourceId::Int(1)));
    // Confirm-then-apply: the failed delete leaves the row in place.
    assert_eq!(controller.working().len(), 1);
}

#[tokio::test]
async fn test_expired_token_surfaces_load_failure_then_recovers() {
    let state = BackendState::requiring_token();
    *state.products.lock().expect("seed") = vec![product_json(1, "Mug", 10.0)];
    let backend = StubBackend::spawn(state).await;
    let session = SessionContext::new();
    let controller = product_controller(&backend, session.clone());

    let err = controller.load().await.expect_err("load without token");
    assert_eq!(err.kind, ErrorKind::LoadFailure);
    assert!(controller.working().is_empty());
    assert!(!controller.is_loading());
    assert!(controller.last_error().is_some());

    // Re-authenticating and retrying through the same controller succeeds.
    session.hydrate(
        Some(secrecy::SecretString::from(TEST_TOKEN.to_string())),
        None,
    );
    controller.load().await.expect("retry after re-auth");
    assert_eq!(controller.working().len(), 1);
    assert!(controller.last_error().is_none());
}

#[tokio::test]
async fn test_order_status_patch_updates_working_collection() {
    let state = BackendState::default();
    *state.orders.lock().expect("seed") = vec![
        order_json(7, "PENDING", 50.0),
        order_json(8, "PENDING", 20.0),
    ];
    let backend = StubBackend::spawn(state).await;
    let client = backend.client::<Order>(kinds::orders::routes(), authed_session());
    let controller = ResourceListController::new(client, kinds::orders::list_config());
    controller.load().await.expect("load");

    let mut partial = Map::new();
    partial.insert("status".to_string(), json!("DELIVERED"));
    controller
        .patch_resource(&ResourceId::Int(7), partial)
        .await
        .expect("patch status");

    let working = controller.working();
    let patched = working
        .iter()
        .find(|o| o.id == ResourceId::Int(7))
        .expect("patched order");
    assert_eq!(patched.status, OrderStatus::Delivered);
    let untouched = working
        .iter()
        .find(|o| o.id == ResourceId::Int(8))
        .expect("other order");
    assert_eq!(untouched.status, OrderStatus::Pending);
    assert_eq!(
        backend.state.orders.lock().expect("state")[0]["status"],
        json!("DELIVERED")
    );
}

#[tokio::test]
async fn test_user_roles_patch_merges_after_bodyless_ack() {
    let state = BackendState::default();
    *state.users.lock().expect("seed") = vec![user_json(4, "staff@example.com", &["ROLE_USER"])];
    let backend = StubBackend::spawn(state).await;
    let client = backend.client::<User>(kinds::users::routes(), authed_session());
    let controller = ResourceListController::new(client, kinds::users::list_config());
    controller.load().await.expect("load");

    let mut partial = Map::new();
    partial.insert(
        "roles".to_string(),
        Value::Array(vec![json!("ROLE_ADMIN"), json!("ROLE_USER")]),
    );
    controller
        .patch_resource(&ResourceId::Int(4), partial)
        .await
        .expect("patch roles");

    // The route acks without a body; the partial is merged locally.
    let working = controller.working();
    assert_eq!(working.len(), 1);
    assert!(working[0].roles.contains(&Role::Admin));
    assert!(working[0].is_admin());
}
