//! Order Repository
//!
//! Order creation allocates the sequential order number inside a
//! bounded retry loop: the unique index on `order_number` rejects the
//! losing side of a concurrent allocation race, and the loser re-reads
//! the latest order and recomputes. See `orders::allocator`.

use super::{BaseRepository, RepoError, RepoResult, now, record_id};
use crate::db::models::{Order, OrderCreate, OrderItem, OrderStatus, OrderUpdate};
use crate::orders::allocator::{
    BASELINE_ORDER_NUMBER, MAX_ALLOCATION_ATTEMPTS, next_order_number_after, parse_order_number,
};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

/// Index name from the schema definition; used to recognize
/// allocation races among duplicate errors.
const ORDER_NUMBER_INDEX: &str = "idx_order_number_unique";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all orders, newest first (paginated)
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC LIMIT $limit START $offset")
            .bind(("limit", limit.max(0)))
            .bind(("offset", offset.max(0)))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(order)
    }

    /// Find order by its order number
    pub async fn find_by_number(&self, number: &str) -> RepoResult<Option<Order>> {
        let number_owned = number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE order_number = $number")
            .bind(("number", number_owned))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Most recently created order, if any
    ///
    /// The allocator seeds from this record only (most recent by
    /// creation time, not maximum numeric value).
    pub async fn find_latest(&self) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY created_at DESC LIMIT 1")
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Create a new order, allocating the next order number
    ///
    /// A failing lookup aborts the create: no order is persisted
    /// without a valid number.
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        for item in &data.items {
            if item.quantity < 1 {
                return Err(RepoError::Validation(
                    "Order item quantity must be at least 1".to_string(),
                ));
            }
        }

        let user = data.user.as_deref().map(|id| record_id("user", id));
        let items: Vec<OrderItem> = data
            .items
            .iter()
            .map(|i| OrderItem {
                product: i.product.as_deref().map(|id| record_id("product", id)),
                quantity: i.quantity,
                price: i.price,
            })
            .collect();

        let mut floor = BASELINE_ORDER_NUMBER;
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let latest = self.find_latest().await?;
            let number =
                next_order_number_after(latest.as_ref().map(|o| o.order_number.as_str()), floor);

            let order = Order {
                id: None,
                order_number: number.clone(),
                user: user.clone(),
                items: items.clone(),
                deliverables: data.deliverables.clone(),
                total: data.total,
                status: data.status.unwrap_or_default(),
                payment_method: data.payment_method.clone(),
                order_notes: data.order_notes.clone(),
                billing_address: data.billing_address.clone(),
                invoice_url: None,
                created_at: now(),
                updated_at: None,
            };

            let result: RepoResult<Option<Order>> = self
                .base
                .db()
                .create(TABLE)
                .content(order)
                .await
                .map_err(RepoError::from);

            match result {
                Ok(Some(created)) => return Ok(created),
                Ok(None) => {
                    return Err(RepoError::Database("Failed to create order".to_string()));
                }
                // Lost an allocation race: another create committed the
                // same number first. Raise the floor past it and retry.
                Err(RepoError::Duplicate(msg)) if msg.contains(ORDER_NUMBER_INDEX) => {
                    tracing::warn!(
                        attempt,
                        number = %number,
                        "Order number already taken, retrying allocation"
                    );
                    floor = parse_order_number(&number).unwrap_or(floor + 1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(RepoError::Database(format!(
            "Order number allocation failed after {} attempts (floor ORD-{})",
            MAX_ALLOCATION_ATTEMPTS, floor
        )))
    }

    /// Update fulfillment fields of an order
    ///
    /// `order_number` is immutable and not part of the update payload.
    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        #[derive(Serialize)]
        struct OrderUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<OrderStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            deliverables: Option<Vec<crate::db::models::Deliverable>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            payment_method: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            order_notes: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            billing_address: Option<crate::db::models::BillingAddress>,
            #[serde(skip_serializing_if = "Option::is_none")]
            invoice_url: Option<String>,
            updated_at: String,
        }

        let update_data = OrderUpdateDb {
            status: data.status,
            deliverables: data.deliverables,
            payment_method: data.payment_method,
            order_notes: data.order_notes,
            billing_address: data.billing_address,
            invoice_url: data.invoice_url,
            updated_at: now(),
        };

        let rid = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid))
            .bind(("data", update_data))
            .await?
            .check()?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Hard delete an order
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Order> = self.base.db().delete(record_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
