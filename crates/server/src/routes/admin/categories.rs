//! Admin menu category handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use table_tap_core::{CategoryId, MenuCategory};

use super::RestaurantScope;
use crate::error::Result;
use crate::services::categories::{CategoryService, CreateCategory, UpdateCategory};
use crate::state::AppState;

/// `POST /api/admin/menu/categories`
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Json(payload): Json<CreateCategory>,
) -> Result<Json<MenuCategory>> {
    let category = CategoryService::new(state.pool())
        .create(restaurant_id, payload)
        .await?;

    tracing::info!(category = %category.id, "category created");
    Ok(Json(category))
}

/// `GET /api/admin/menu/categories`
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
) -> Result<Json<Vec<MenuCategory>>> {
    let categories = CategoryService::new(state.pool()).list(restaurant_id).await?;
    Ok(Json(categories))
}

/// `PUT /api/admin/menu/categories/{id}`
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<CategoryId>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<MenuCategory>> {
    let category = CategoryService::new(state.pool())
        .update(id, restaurant_id, payload)
        .await?;
    Ok(Json(category))
}

/// `PATCH /api/admin/menu/categories/{id}/status`
///
/// Deactivates the category (soft delete).
#[instrument(skip(state))]
pub async fn deactivate(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<CategoryId>,
) -> Result<Json<MenuCategory>> {
    let category = CategoryService::new(state.pool())
        .deactivate(id, restaurant_id)
        .await?;

    tracing::info!(category = %category.id, "category deactivated");
    Ok(Json(category))
}
