//! Order workflow integration tests
//!
//! Exercises the allocator and notifier against a real embedded
//! database in a temp directory, with the in-memory email transport.

use std::sync::Arc;

use pearl_server::core::Config;
use pearl_server::db::DbService;
use pearl_server::db::models::{
    Deliverable, Order, OrderCreate, OrderItemInput, OrderStatus, OrderUpdate, UserCreate,
};
use pearl_server::db::repository::{OrderRepository, Repository, UserRepository};
use pearl_server::orders::notifier;
use pearl_server::services::email::{Mailer, MemoryTransport};
use pearl_server::services::hooks::HookQueue;
use pearl_server::services::revalidate::Revalidator;
use pearl_server::HookWorker;

async fn test_db() -> (tempfile::TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(&tmp.path().join("db")).await.unwrap();
    (tmp, db)
}

fn test_config(data_dir: &std::path::Path) -> Config {
    let mut config = Config::with_overrides(data_dir.to_string_lossy().to_string(), 0);
    config.store_name = "Pearl".to_string();
    config.public_base_url = "https://store.test".to_string();
    config.default_order_notification_email = Some("orders@store.test".to_string());
    config.support_email = Some("info@store.test".to_string());
    config
}

fn checkout(total: f64, deliverables: Vec<Deliverable>) -> OrderCreate {
    OrderCreate {
        user: None,
        items: vec![OrderItemInput {
            product: None,
            quantity: 1,
            price: total,
        }],
        deliverables,
        total,
        status: None,
        payment_method: Some("card".to_string()),
        order_notes: None,
        billing_address: None,
    }
}

fn zip_file(name: &str) -> Deliverable {
    Deliverable {
        name: Some(name.to_string()),
        url: format!("https://cdn.store.test/{name}.zip"),
    }
}

#[tokio::test]
async fn sequential_orders_get_gap_free_numbers_from_101() {
    let (_tmp, db) = test_db().await;
    let repo = OrderRepository::new(db.db.clone());

    for n in 101..=105 {
        let order = repo.create(checkout(49.0, vec![])).await.unwrap();
        assert_eq!(order.order_number, format!("ORD-{n}"));
        assert_eq!(order.status, OrderStatus::Pending);
    }
}

#[tokio::test]
async fn allocation_seeds_from_most_recent_order_only() {
    let (_tmp, db) = test_db().await;
    let repo = OrderRepository::new(db.db.clone());

    // Malformed legacy record, created earlier
    seed_order(&db, "LEGACY-7", "2026-01-01T00:00:00.000Z").await;
    // Most recent record carries a valid number
    seed_order(&db, "ORD-137", "2026-01-02T00:00:00.000Z").await;

    let order = repo.create(checkout(10.0, vec![])).await.unwrap();
    assert_eq!(order.order_number, "ORD-138");
}

#[tokio::test]
async fn malformed_latest_number_falls_back_to_baseline() {
    let (_tmp, db) = test_db().await;
    let repo = OrderRepository::new(db.db.clone());

    seed_order(&db, "not-a-number", "2026-01-02T00:00:00.000Z").await;

    let order = repo.create(checkout(10.0, vec![])).await.unwrap();
    assert_eq!(order.order_number, "ORD-101");
}

#[tokio::test]
async fn zero_quantity_item_is_rejected() {
    let (_tmp, db) = test_db().await;
    let repo = OrderRepository::new(db.db.clone());

    let mut payload = checkout(10.0, vec![]);
    payload.items[0].quantity = 0;

    let err = repo.create(payload).await.unwrap_err();
    assert!(err.to_string().contains("quantity"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_never_share_a_number() {
    use rand::Rng;

    let (_tmp, db) = test_db().await;
    let repo = Arc::new(OrderRepository::new(db.db.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = repo.clone();
        let total = rand::thread_rng().gen_range(5.0..500.0);
        handles.push(tokio::spawn(async move {
            repo.create(checkout(total, vec![])).await.unwrap()
        }));
    }

    let mut numbers = std::collections::HashSet::new();
    for handle in handles {
        let order = handle.await.unwrap();
        assert!(
            numbers.insert(order.order_number.clone()),
            "duplicate order number {}",
            order.order_number
        );
    }
    assert_eq!(numbers.len(), 8);
}

#[tokio::test]
async fn completion_email_links_every_deliverable() {
    let (tmp, db) = test_db().await;
    let config = test_config(tmp.path());

    let users = UserRepository::new(db.db.clone());
    let user = users
        .create(UserCreate {
            email: "jane@customer.test".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            street: None,
            address: None,
            city: None,
            state: None,
            zip: None,
            country: None,
            role: None,
        })
        .await
        .unwrap();

    let repo = OrderRepository::new(db.db.clone());
    let mut payload = checkout(99.0, vec![zip_file("kitchen"), zip_file("bathroom")]);
    payload.user = user.id.as_ref().map(|id| id.to_string());
    let order = repo.create(payload).await.unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    repo.update(
        &order_id,
        OrderUpdate {
            status: Some(OrderStatus::Completed),
            deliverables: None,
            payment_method: None,
            order_notes: None,
            billing_address: None,
            invoice_url: None,
        },
    )
    .await
    .unwrap();

    let transport = MemoryTransport::new();
    let mailer = Mailer::new(Arc::new(transport.clone()), "noreply@store.test");
    notifier::send_completion_email(&db.db, &mailer, &config, &order_id).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "jane@customer.test");
    assert_eq!(sent[0].subject, "Order Completed");
    assert!(sent[0].html.contains("Download kitchen"));
    assert!(sent[0].html.contains("Download bathroom"));
    assert!(sent[0].html.contains("https://cdn.store.test/kitchen.zip"));
    assert!(sent[0].html.contains("https://cdn.store.test/bathroom.zip"));
    assert!(sent[0].html.contains(&order.order_number));
}

#[tokio::test]
async fn no_deliverables_means_no_email() {
    let (tmp, db) = test_db().await;
    let config = test_config(tmp.path());

    let repo = OrderRepository::new(db.db.clone());
    let mut payload = checkout(15.0, vec![]);
    payload.status = Some(OrderStatus::Completed);
    let order = repo.create(payload).await.unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let transport = MemoryTransport::new();
    let mailer = Mailer::new(Arc::new(transport.clone()), "noreply@store.test");
    notifier::send_completion_email(&db.db, &mailer, &config, &order_id).await;

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn guest_order_falls_back_to_default_recipient() {
    let (tmp, db) = test_db().await;
    let config = test_config(tmp.path());

    let repo = OrderRepository::new(db.db.clone());
    let mut payload = checkout(25.0, vec![zip_file("poster")]);
    payload.status = Some(OrderStatus::Completed);
    let order = repo.create(payload).await.unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let transport = MemoryTransport::new();
    let mailer = Mailer::new(Arc::new(transport.clone()), "noreply@store.test");
    notifier::send_completion_email(&db.db, &mailer, &config, &order_id).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "orders@store.test");
}

#[tokio::test]
async fn unresolvable_recipient_skips_send() {
    let (tmp, db) = test_db().await;
    let mut config = test_config(tmp.path());
    config.default_order_notification_email = None;

    let repo = OrderRepository::new(db.db.clone());
    let mut payload = checkout(25.0, vec![zip_file("poster")]);
    payload.status = Some(OrderStatus::Completed);
    let order = repo.create(payload).await.unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let transport = MemoryTransport::new();
    let mailer = Mailer::new(Arc::new(transport.clone()), "noreply@store.test");
    notifier::send_completion_email(&db.db, &mailer, &config, &order_id).await;

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn transport_failure_leaves_order_completed() {
    let (tmp, db) = test_db().await;
    let config = test_config(tmp.path());

    let repo = OrderRepository::new(db.db.clone());
    let mut payload = checkout(59.0, vec![zip_file("pack")]);
    payload.status = Some(OrderStatus::Completed);
    let order = repo.create(payload).await.unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let transport = MemoryTransport::new();
    transport.set_failing(true);
    let mailer = Mailer::new(Arc::new(transport.clone()), "noreply@store.test");
    notifier::send_completion_email(&db.db, &mailer, &config, &order_id).await;

    assert!(transport.sent().is_empty());

    // The failed send must not touch the persisted order
    let reloaded = repo.find_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, OrderStatus::Completed);
}

#[tokio::test]
async fn hook_worker_drains_queue_and_sends() {
    let (tmp, db) = test_db().await;
    let config = test_config(tmp.path());

    let repo = OrderRepository::new(db.db.clone());
    let mut payload = checkout(12.0, vec![zip_file("brushes")]);
    payload.status = Some(OrderStatus::Completed);
    let order = repo.create(payload).await.unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    let transport = MemoryTransport::new();
    let mailer = Mailer::new(Arc::new(transport.clone()), "noreply@store.test");

    let (queue, rx) = HookQueue::new(8);
    queue.order_completed(order_id);
    drop(queue); // close the channel so the worker drains and exits

    let worker = HookWorker::new(db.db.clone(), mailer, Revalidator::disabled(), config);
    worker
        .run(rx, tokio_util::sync::CancellationToken::new())
        .await;

    assert_eq!(transport.sent().len(), 1);
}

/// Insert an order record directly, bypassing the allocator
async fn seed_order(db: &DbService, order_number: &str, created_at: &str) {
    let order = Order {
        id: None,
        order_number: order_number.to_string(),
        user: None,
        items: Vec::new(),
        deliverables: Vec::new(),
        total: 0.0,
        status: OrderStatus::Pending,
        payment_method: None,
        order_notes: None,
        billing_address: None,
        invoice_url: None,
        created_at: created_at.to_string(),
        updated_at: None,
    };
    let created: Option<Order> = db.db.create("order").content(order).await.unwrap();
    assert!(created.is_some());
}
