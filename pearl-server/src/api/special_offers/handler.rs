//! Special Offer API Handlers
//!
//! Offer writes invalidate the "products" cache tag, same as product
//! writes: offers render inside product listings on the storefront.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{SpecialOfferCreate, SpecialOfferResponse, SpecialOfferUpdate};
use crate::db::repository::{Repository, SpecialOfferRepository};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_TITLE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Cache tag invalidated by special-offer writes
const REVALIDATE_TAG: &str = "products";

/// List all special offers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SpecialOfferResponse>>> {
    let repo = SpecialOfferRepository::new(state.db.clone());
    let offers = repo.find_all().await?;
    Ok(Json(offers.into_iter().map(|o| o.into()).collect()))
}

/// Get special offer by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SpecialOfferResponse>> {
    let repo = SpecialOfferRepository::new(state.db.clone());
    let offer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Special offer {} not found", id)))?;
    Ok(Json(offer.into()))
}

/// Get special offer by slug
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<SpecialOfferResponse>> {
    let repo = SpecialOfferRepository::new(state.db.clone());
    let offer = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Special offer '{}' not found", slug)))?;
    Ok(Json(offer.into()))
}

/// Create a special offer
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SpecialOfferCreate>,
) -> AppResult<Json<SpecialOfferResponse>> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.subtitle, "subtitle", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.excerpt, "excerpt", MAX_NOTE_LEN)?;

    let repo = SpecialOfferRepository::new(state.db.clone());
    let offer = repo.create(payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(offer.into()))
}

/// Update a special offer
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SpecialOfferUpdate>,
) -> AppResult<Json<SpecialOfferResponse>> {
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.subtitle, "subtitle", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.excerpt, "excerpt", MAX_NOTE_LEN)?;

    let repo = SpecialOfferRepository::new(state.db.clone());
    let offer = repo.update(&id, payload).await?;

    state.hooks.revalidate(&[REVALIDATE_TAG]);

    Ok(Json(offer.into()))
}

/// Delete a special offer
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = SpecialOfferRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.hooks.revalidate(&[REVALIDATE_TAG]);
    }

    Ok(Json(result))
}
