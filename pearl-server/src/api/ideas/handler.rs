//! Idea API Handlers
//!
//! 写操作完成后入队 "ideas" 标签的缓存失效。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{IdeaCreate, IdeaResponse, IdeaUpdate};
use crate::db::repository::{IdeaRepository, Repository};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_TITLE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Cache tag invalidated by idea writes
const REVALIDATE_TAG: &str = "ideas";

/// GET /api/ideas - 获取所有灵感内容
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<IdeaResponse>>> {
    let repo = IdeaRepository::new(state.db.clone());
    let ideas = repo.find_all().await?;
    Ok(Json(ideas.into_iter().map(|i| i.into()).collect()))
}

/// GET /api/ideas/:id - 获取单个灵感内容
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<IdeaResponse>> {
    let repo = IdeaRepository::new(state.db.clone());
    let idea = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Idea {} not found", id)))?;
    Ok(Json(idea.into()))
}

/// GET /api/ideas/slug/:slug - 按 slug 获取灵感内容
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<IdeaResponse>> {
    let repo = IdeaRepository::new(state.db.clone());
    let idea = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Idea '{}' not found", slug)))?;
    Ok(Json(idea.into()))
}

/// POST /api/ideas - 创建灵感内容
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IdeaCreate>,
) -> AppResult<Json<IdeaResponse>> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    validate_optional_text(&payload.excerpt, "excerpt", MAX_NOTE_LEN)?;

    let repo = IdeaRepository::new(state.db.clone());
    let idea = repo.create(payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(idea.into()))
}

/// PUT /api/ideas/:id - 更新灵感内容
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IdeaUpdate>,
) -> AppResult<Json<IdeaResponse>> {
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;
    validate_optional_text(&payload.excerpt, "excerpt", MAX_NOTE_LEN)?;

    let repo = IdeaRepository::new(state.db.clone());
    let idea = repo.update(&id, payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(idea.into()))
}

/// DELETE /api/ideas/:id - 删除灵感内容
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = IdeaRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.hooks.revalidate(&[REVALIDATE_TAG]);
    }

    Ok(Json(result))
}
