//! Product API Handlers
//!
//! 商品写操作完成后入队 "products" 标签的缓存失效。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{ProductCreate, ProductResponse, ProductUpdate};
use crate::db::repository::{ProductRepository, Repository};
use crate::utils::validation::{MAX_TITLE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Cache tag invalidated by product writes
const REVALIDATE_TAG: &str = "products";

/// Query params for listing products
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter by category record id
    pub category: Option<String>,
}

/// GET /api/products - 获取所有商品 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = match query.category {
        Some(category) => repo.find_by_category(&category).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(products.into_iter().map(|p| p.into()).collect()))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product.into()))
}

/// GET /api/products/slug/:slug - 按 slug 获取商品
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product '{}' not found", slug)))?;
    Ok(Json(product.into()))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ProductResponse>> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    validate_optional_text(&payload.big_image, "big_image", MAX_URL_LEN)?;
    validate_optional_text(&payload.preview, "preview", MAX_URL_LEN)?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(product.into()))
}

/// PUT /api/products/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductResponse>> {
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    validate_optional_text(&payload.big_image, "big_image", MAX_URL_LEN)?;
    validate_optional_text(&payload.preview, "preview", MAX_URL_LEN)?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(product.into()))
}

/// DELETE /api/products/:id - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ProductRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.hooks.revalidate(&[REVALIDATE_TAG]);
    }

    Ok(Json(result))
}
