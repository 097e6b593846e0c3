//! Order Model
//!
//! Customer purchase records. `order_number` is assigned by the
//! allocator exactly once at creation and never accepted from the
//! client; `deliverables` is the canonical list of downloadable assets
//! the completion email links to.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Record link to the purchased product
    pub product: Option<RecordId>,
    pub quantity: i32,
    pub price: f64,
}

/// Downloadable asset attached to an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deliverable {
    pub name: Option<String>,
    /// Absolute URL, or a path resolved against the public base URL
    pub url: String,
}

/// Billing address group
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

/// Order model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Unique, immutable, "ORD-<n>"
    pub order_number: String,
    /// Record link to the customer account (absent for guest checkout)
    pub user: Option<RecordId>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub payment_method: Option<String>,
    pub order_notes: Option<String>,
    pub billing_address: Option<BillingAddress>,
    /// Invoice file URL
    pub invoice_url: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Line item as accepted from the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// Product record id ("product:xyz" or bare id)
    pub product: Option<String>,
    pub quantity: i32,
    pub price: f64,
}

/// Create order payload (public storefront submission)
///
/// `order_number` is intentionally absent — the allocator assigns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    /// User record id ("user:xyz" or bare id)
    pub user: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    pub total: f64,
    pub status: Option<OrderStatus>,
    pub payment_method: Option<String>,
    pub order_notes: Option<String>,
    pub billing_address: Option<BillingAddress>,
}

/// Update order payload (admin surface)
///
/// `order_number`, `user`, `items` and `total` are immutable after
/// creation; only fulfillment-related fields can change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverables: Option<Vec<Deliverable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BillingAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_url: Option<String>,
}

/// Line item response with string record id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product: Option<String>,
    pub quantity: i32,
    pub price: f64,
}

/// Order response with string record ids
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_number: String,
    pub user: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub deliverables: Vec<Deliverable>,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: Option<String>,
    pub order_notes: Option<String>,
    pub billing_address: Option<BillingAddress>,
    pub invoice_url: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id.map(|id| id.to_string()).unwrap_or_default(),
            order_number: o.order_number,
            user: o.user.map(|id| id.to_string()),
            items: o
                .items
                .into_iter()
                .map(|i| OrderItemResponse {
                    product: i.product.map(|id| id.to_string()),
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect(),
            deliverables: o.deliverables,
            total: o.total,
            status: o.status,
            payment_method: o.payment_method,
            order_notes: o.order_notes,
            billing_address: o.billing_address,
            invoice_url: o.invoice_url,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}
