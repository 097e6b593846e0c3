//! Order API Handlers
//!
//! Writes drive the order finalization workflow: creation allocates
//! the order number (inside the repository), and any write that lands
//! an order in `completed` enqueues the completion email. The email is
//! dispatched through the hook queue — a slow or failing mail provider
//! never blocks or fails the request.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{OrderCreate, OrderResponse, OrderStatus, OrderUpdate};
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// List all orders (paginated, newest first)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all(query.limit, query.offset).await?;
    Ok(Json(orders.into_iter().map(|o| o.into()).collect()))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order.into()))
}

/// Get order by order number
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_number(&number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", number)))?;
    Ok(Json(order.into()))
}

/// Create an order (public storefront checkout)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderResponse>> {
    validate_optional_text(&payload.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.order_notes, "order_notes", MAX_NOTE_LEN)?;
    if payload.total < 0.0 {
        return Err(AppError::validation("total must not be negative"));
    }

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(payload).await?;

    // An order created directly in `completed` still counts as a
    // transition into the terminal status.
    if order.status == OrderStatus::Completed
        && let Some(id) = &order.id
    {
        state.hooks.order_completed(id.to_string());
    }

    Ok(Json(order.into()))
}

/// Update an order (admin surface)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<OrderResponse>> {
    validate_optional_text(&payload.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.order_notes, "order_notes", MAX_NOTE_LEN)?;

    let repo = OrderRepository::new(state.db.clone());
    let previous = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    let order = repo.update(&id, payload).await?;

    // Notify exactly on the transition into `completed`; re-saving an
    // already completed order does not re-send.
    if order.status == OrderStatus::Completed
        && previous.status != OrderStatus::Completed
        && let Some(order_id) = &order.id
    {
        state.hooks.order_completed(order_id.to_string());
    }

    Ok(Json(order.into()))
}

/// Delete an order (admin surface)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = OrderRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    Ok(Json(result))
}
