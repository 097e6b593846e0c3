//! Test collection API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{TestEntryCreate, TestEntryResponse, TestEntryUpdate};
use crate::db::repository::{Repository, TestEntryRepository};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_TITLE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Cache tag invalidated by test-entry writes
const REVALIDATE_TAG: &str = "products";

/// List all test entries
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TestEntryResponse>>> {
    let repo = TestEntryRepository::new(state.db.clone());
    let entries = repo.find_all().await?;
    Ok(Json(entries.into_iter().map(|t| t.into()).collect()))
}

/// Get test entry by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TestEntryResponse>> {
    let repo = TestEntryRepository::new(state.db.clone());
    let entry = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Test entry {} not found", id)))?;
    Ok(Json(entry.into()))
}

/// Create a test entry
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TestEntryCreate>,
) -> AppResult<Json<TestEntryResponse>> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_required_text(&payload.excerpt, "excerpt", MAX_NOTE_LEN)?;

    let repo = TestEntryRepository::new(state.db.clone());
    let entry = repo.create(payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(entry.into()))
}

/// Update a test entry
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TestEntryUpdate>,
) -> AppResult<Json<TestEntryResponse>> {
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.excerpt, "excerpt", MAX_NOTE_LEN)?;

    let repo = TestEntryRepository::new(state.db.clone());
    let entry = repo.update(&id, payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(entry.into()))
}

/// Delete a test entry
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TestEntryRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.hooks.revalidate(&[REVALIDATE_TAG]);
    }

    Ok(Json(result))
}
