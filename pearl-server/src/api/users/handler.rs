//! User API Handlers
//!
//! Profile data only; credentials and sessions live in the platform
//! auth service.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{UserCreate, UserResponse, UserUpdate};
use crate::db::repository::{Repository, UserRepository};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_SHORT_TEXT_LEN, MAX_TITLE_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// List all users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserResponse>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(Json(users.into_iter().map(|u| u.into()).collect()))
}

/// Get user by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user.into()))
}

/// Create a user
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<UserResponse>> {
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("email is not a valid address"));
    }
    validate_required_text(&payload.first_name, "first_name", MAX_TITLE_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;

    Ok(Json(user.into()))
}

/// Update a user
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    if let Some(email) = &payload.email
        && !email.contains('@')
    {
        return Err(AppError::validation("email is not a valid address"));
    }
    validate_optional_text(&payload.first_name, "first_name", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.last_name, "last_name", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.update(&id, payload).await?;

    Ok(Json(user.into()))
}

/// Delete a user
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    Ok(Json(result))
}
