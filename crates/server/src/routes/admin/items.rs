//! Admin menu item handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::HeaderMap,
    http::header,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use table_tap_core::{CategoryId, ItemId, MenuItem, MenuItemStatus};

use super::RestaurantScope;
use crate::error::Result;
use crate::services::items::{CreateItem, ItemService, UpdateItem};
use crate::state::AppState;

/// Query filters for the admin item listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilters {
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub status: Option<MenuItemStatus>,
}

/// Status-change body for `PATCH .../status`.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: MenuItemStatus,
}

/// `POST /api/admin/menu/items`
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Json(payload): Json<CreateItem>,
) -> Result<Json<MenuItem>> {
    let item = ItemService::new(state.pool())
        .create(restaurant_id, payload)
        .await?;

    tracing::info!(item = %item.id, "menu item created");
    Ok(Json(item))
}

/// `GET /api/admin/menu/items`
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Query(filters): Query<ItemFilters>,
) -> Result<Json<Vec<MenuItem>>> {
    let items = ItemService::new(state.pool())
        .list(restaurant_id, filters.category_id, filters.status)
        .await?;
    Ok(Json(items))
}

/// `GET /api/admin/menu/items/{id}`
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<ItemId>,
) -> Result<Json<MenuItem>> {
    let item = ItemService::new(state.pool()).get(id, restaurant_id).await?;
    Ok(Json(item))
}

/// `PUT /api/admin/menu/items/{id}`
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<ItemId>,
    Json(payload): Json<UpdateItem>,
) -> Result<Json<MenuItem>> {
    let item = ItemService::new(state.pool())
        .update(id, restaurant_id, payload)
        .await?;
    Ok(Json(item))
}

/// `PATCH /api/admin/menu/items/{id}/status`
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<ItemId>,
    Json(body): Json<StatusBody>,
) -> Result<Json<serde_json::Value>> {
    ItemService::new(state.pool())
        .set_status(id, restaurant_id, body.status)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// `POST /api/admin/menu/items/{id}/photos`
///
/// Raw image bytes in the request body; the Content-Type header is stored
/// alongside and echoed back on fetch.
#[instrument(skip(state, headers, body))]
pub async fn upload_photo(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<ItemId>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg");

    let photo_id = ItemService::new(state.pool())
        .add_photo(id, restaurant_id, &body, mime_type)
        .await?;

    Ok(Json(json!({ "success": true, "photoId": photo_id })))
}
