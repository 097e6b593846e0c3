//! Router-level API tests
//!
//! Drives the real axum router with oneshot requests against an
//! embedded database, including the order completion flow end to end
//! (hook worker running).

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use tower::ServiceExt;

use pearl_server::core::server::build_app;
use pearl_server::core::{BackgroundTasks, Config, ServerState};
use pearl_server::db::DbService;
use pearl_server::services::email::{Mailer, MemoryTransport, SentEmail};
use pearl_server::services::revalidate::Revalidator;

struct TestApp {
    _tmp: tempfile::TempDir,
    app: Router,
    state: ServerState,
    transport: MemoryTransport,
}

async fn test_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("db")).await.unwrap();

    let mut config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);
    config.store_name = "Pearl".to_string();
    config.public_base_url = "https://store.test".to_string();
    config.default_order_notification_email = Some("orders@store.test".to_string());

    let transport = MemoryTransport::new();
    let mailer = Mailer::new(Arc::new(transport.clone()), "noreply@store.test");
    let state = ServerState::new(config, db.db, mailer, Revalidator::disabled());

    let app = build_app().with_state(state.clone());

    TestApp {
        _tmp: tmp,
        app,
        state,
        transport,
    }
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn wait_for_emails(transport: &MemoryTransport, expected: usize) -> Vec<SentEmail> {
    for _ in 0..100 {
        if transport.sent().len() >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    transport.sent()
}

#[tokio::test]
async fn category_crud_roundtrip_with_derived_slug() {
    let t = test_app().await;

    let (status, created) = request(
        &t.app,
        "POST",
        "/api/categories",
        Some(r#"{"title": "Modular Kitchens"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["slug"], "modular-kitchens");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, list) = request(&t.app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Slug follows the title on update
    let (status, updated) = request(
        &t.app,
        "PUT",
        &format!("/api/categories/{id}"),
        Some(r#"{"title": "Outdoor Sets"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["slug"], "outdoor-sets");

    let (status, _) = request(&t.app, "GET", "/api/categories/slug/outdoor-sets", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, deleted) = request(&t.app, "DELETE", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, serde_json::Value::Bool(true));

    let (status, _) = request(&t.app, "GET", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let t = test_app().await;

    let (status, _) = request(
        &t.app,
        "POST",
        "/api/products",
        Some(r#"{"title": "Velvet Sofa"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &t.app,
        "POST",
        "/api/products",
        Some(r#"{"title": "Velvet Sofa"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let t = test_app().await;

    let (status, body) = request(&t.app, "POST", "/api/ideas", Some(r#"{"title": "  "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn unknown_id_returns_404() {
    let t = test_app().await;

    let (status, _) = request(&t.app, "GET", "/api/products/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_user_email_is_a_conflict() {
    let t = test_app().await;

    let payload = r#"{"email": "jane@customer.test", "first_name": "Jane", "last_name": "Doe"}"#;
    let (status, _) = request(&t.app, "POST", "/api/users", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&t.app, "POST", "/api/users", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn checkout_allocates_sequential_numbers() {
    let t = test_app().await;

    let payload = r#"{"items": [{"quantity": 1, "price": 49.0}], "total": 49.0}"#;

    let (status, first) = request(&t.app, "POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["order_number"], "ORD-101");
    assert_eq!(first["status"], "pending");

    let (status, second) = request(&t.app, "POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["order_number"], "ORD-102");
}

#[tokio::test]
async fn zero_quantity_checkout_is_rejected() {
    let t = test_app().await;

    let payload = r#"{"items": [{"quantity": 0, "price": 49.0}], "total": 49.0}"#;
    let (status, _) = request(&t.app, "POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn completing_an_order_sends_exactly_one_email() {
    let t = test_app().await;

    // Run the hook worker like the real server does
    let mut tasks = BackgroundTasks::new();
    t.state.start_background_tasks(&mut tasks);

    let payload = r#"{
        "items": [{"quantity": 1, "price": 120.0}],
        "deliverables": [
            {"name": "Kitchen Pack", "url": "https://cdn.store.test/kitchen.zip"},
            {"name": null, "url": "/media/manual.pdf"}
        ],
        "total": 120.0
    }"#;
    let (status, order) = request(&t.app, "POST", "/api/orders", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let id = order["id"].as_str().unwrap().to_string();

    // pending -> completed triggers the notification
    let (status, updated) = request(
        &t.app,
        "PUT",
        &format!("/api/orders/{id}"),
        Some(r#"{"status": "completed"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");

    let sent = wait_for_emails(&t.transport, 1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "orders@store.test");
    assert!(sent[0].html.contains("Download Kitchen Pack"));
    // Unnamed deliverable gets the generic label
    assert!(sent[0].html.contains("Download File"));
    // Relative deliverable URL resolved against the public base URL
    assert!(sent[0].html.contains("https://store.test/media/manual.pdf"));

    // Re-saving a completed order must not re-send
    let (status, _) = request(
        &t.app,
        "PUT",
        &format!("/api/orders/{id}"),
        Some(r#"{"order_notes": "left at the door"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(t.transport.sent().len(), 1);

    tasks.shutdown().await;
}

#[tokio::test]
async fn failed_delivery_does_not_fail_the_update() {
    let t = test_app().await;

    let mut tasks = BackgroundTasks::new();
    t.state.start_background_tasks(&mut tasks);

    t.transport.set_failing(true);

    let payload = r#"{
        "items": [{"quantity": 1, "price": 10.0}],
        "deliverables": [{"name": "Pack", "url": "https://cdn.store.test/pack.zip"}],
        "total": 10.0
    }"#;
    let (_, order) = request(&t.app, "POST", "/api/orders", Some(payload)).await;
    let id = order["id"].as_str().unwrap().to_string();

    // The client still sees a successful status change
    let (status, updated) = request(
        &t.app,
        "PUT",
        &format!("/api/orders/{id}"),
        Some(r#"{"status": "completed"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "completed");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(t.transport.sent().is_empty());

    // And the persisted order stays completed
    let (status, reloaded) = request(&t.app, "GET", &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reloaded["status"], "completed");

    tasks.shutdown().await;
}
