//! Admin modifier group/option handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;

use table_tap_core::{ItemId, ModifierGroup, ModifierGroupId, ModifierOption, ModifierOptionId};

use super::RestaurantScope;
use crate::error::Result;
use crate::services::items::{CreateModifierGroup, CreateModifierOption, ItemService};
use crate::state::AppState;

/// `POST /api/admin/menu/items/{id}/modifier-groups`
#[instrument(skip(state, payload))]
pub async fn create_group(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(item_id): Path<ItemId>,
    Json(payload): Json<CreateModifierGroup>,
) -> Result<Json<ModifierGroup>> {
    let group = ItemService::new(state.pool())
        .add_modifier_group(item_id, restaurant_id, payload)
        .await?;

    tracing::info!(group = %group.id, item = %item_id, "modifier group created");
    Ok(Json(group))
}

/// `DELETE /api/admin/modifier-groups/{id}`
#[instrument(skip(state))]
pub async fn delete_group(
    State(state): State<AppState>,
    RestaurantScope(_restaurant_id): RestaurantScope,
    Path(group_id): Path<ModifierGroupId>,
) -> Result<Json<serde_json::Value>> {
    ItemService::new(state.pool())
        .remove_modifier_group(group_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// `POST /api/admin/modifier-groups/{id}/options`
#[instrument(skip(state, payload))]
pub async fn create_option(
    State(state): State<AppState>,
    RestaurantScope(_restaurant_id): RestaurantScope,
    Path(group_id): Path<ModifierGroupId>,
    Json(payload): Json<CreateModifierOption>,
) -> Result<Json<ModifierOption>> {
    let option = ItemService::new(state.pool())
        .add_modifier_option(group_id, payload)
        .await?;

    Ok(Json(option))
}

/// `DELETE /api/admin/modifier-options/{id}`
#[instrument(skip(state))]
pub async fn delete_option(
    State(state): State<AppState>,
    RestaurantScope(_restaurant_id): RestaurantScope,
    Path(option_id): Path<ModifierOptionId>,
) -> Result<Json<serde_json::Value>> {
    ItemService::new(state.pool())
        .remove_modifier_option(option_id)
        .await?;

    Ok(Json(json!({ "success": true })))
}
