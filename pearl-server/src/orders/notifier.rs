//! Order completion notifier
//!
//! Runs on the hook worker after an order transitions into
//! `completed`. Re-reads the persisted order, resolves the recipient,
//! renders the download email and hands it to the mail transport.
//!
//! Nothing here propagates: a failure at any step is logged and the
//! triggering write stays committed.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::models::OrderStatus;
use crate::db::repository::{OrderRepository, Repository, UserRepository};
use crate::orders::template::{self, DownloadLink};
use crate::services::email::Mailer;

/// Send the completion email for an order, best effort
pub async fn send_completion_email(
    db: &Surreal<Db>,
    mailer: &Mailer,
    config: &Config,
    order_id: &str,
) {
    let repo = OrderRepository::new(db.clone());
    let order = match repo.find_by_id(order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => {
            tracing::warn!(order_id = %order_id, "Order vanished before notification");
            return;
        }
        Err(e) => {
            tracing::warn!(order_id = %order_id, error = %e, "Failed to load order for notification");
            return;
        }
    };

    // Guard: only completed orders with something to deliver
    if order.status != OrderStatus::Completed {
        tracing::debug!(order_id = %order_id, "Order no longer completed, skipping notification");
        return;
    }
    if order.deliverables.is_empty() {
        tracing::debug!(
            order_number = %order.order_number,
            "Order has no deliverables, skipping notification"
        );
        return;
    }

    // Recipient: linked user's email, else the configured fallback.
    // If neither resolves, skip and log — never send to an empty address.
    let mut recipient: Option<String> = None;
    if let Some(user_id) = &order.user {
        let users = UserRepository::new(db.clone());
        match users.find_by_id(&user_id.to_string()).await {
            Ok(Some(user)) if !user.email.is_empty() => recipient = Some(user.email),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(user = %user_id, error = %e, "Failed to look up order user");
            }
        }
    }
    let recipient = recipient.or_else(|| config.default_order_notification_email.clone());
    let Some(recipient) = recipient else {
        tracing::warn!(
            order_number = %order.order_number,
            "No recipient for completion email (no user email, no default configured), skipping"
        );
        return;
    };

    let links: Vec<DownloadLink> = order
        .deliverables
        .iter()
        .map(|d| DownloadLink {
            label: d.name.clone().unwrap_or_else(|| "File".to_string()),
            url: template::resolve_url(&config.public_base_url, &d.url),
        })
        .collect();

    let html = template::render_order_completed(config, &order.order_number, &links);

    match mailer.send(&recipient, "Order Completed", &html).await {
        Ok(()) => {
            tracing::info!(
                order_number = %order.order_number,
                to = %recipient,
                links = links.len(),
                "Order completion email sent"
            );
        }
        Err(e) => {
            tracing::error!(
                order_number = %order.order_number,
                error = %e,
                "Error sending order completed email"
            );
        }
    }
}
