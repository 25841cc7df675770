//! Public menu route handlers.
//!
//! The ordering client reaches these without authentication; the table
//! id + QR token pair is the entry credential.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use table_tap_core::{ItemId, MenuPayload, MenuResponse, Pagination, PhotoId};

use crate::db::categories::CategoryRepository;
use crate::db::items::ItemRepository;
use crate::db::tables::TableRepository;
use crate::error::{AppError, Result};
use crate::services::items::ItemService;
use crate::state::{AppState, CachedPhoto};

/// Query parameters for the public menu endpoint.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Table id from the QR link.
    pub table: table_tap_core::TableId,
    /// QR token from the QR link.
    pub token: String,
}

/// `GET /api/menu?table&token`
///
/// Validates the table/token pair, then assembles the full menu snapshot
/// the client caches: active categories plus every item with its modifier
/// groups, ordered by popularity.
#[instrument(skip(state, query))]
pub async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<axum::Json<MenuResponse>> {
    let tables = TableRepository::new(state.pool());

    let table = tables
        .get_by_token(query.table, &query.token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid table or token".to_owned()))?;

    let categories = CategoryRepository::new(state.pool())
        .list_active(table.restaurant_id)
        .await?;
    let items = ItemRepository::new(state.pool())
        .list_for_menu(table.restaurant_id)
        .await?;

    let pagination = Pagination::single_page(items.len() as u64);

    Ok(axum::Json(MenuResponse {
        success: true,
        message: None,
        table: table.context(),
        menu: MenuPayload {
            categories,
            items,
            pagination,
        },
    }))
}

/// `GET /api/menu/items/{id}/photos/{photo_id}`
///
/// Serves photo bytes with their stored content type. Bytes are cached
/// in-process with a short TTL since menu photos churn rarely.
#[instrument(skip(state))]
pub async fn get_item_photo(
    State(state): State<AppState>,
    Path((item_id, photo_id)): Path<(ItemId, PhotoId)>,
) -> Result<Response> {
    if let Some(cached) = state.photo_cache().get(&photo_id).await {
        return Ok(photo_response(&cached));
    }

    let photo = ItemService::new(state.pool())
        .get_photo(item_id, photo_id)
        .await?;

    let cached = Arc::new(CachedPhoto {
        mime_type: photo.mime_type,
        content: photo.content,
    });
    state
        .photo_cache()
        .insert(photo_id, Arc::clone(&cached))
        .await;

    Ok(photo_response(&cached))
}

fn photo_response(photo: &CachedPhoto) -> Response {
    (
        [(header::CONTENT_TYPE, photo.mime_type.clone())],
        photo.content.clone(),
    )
        .into_response()
}
