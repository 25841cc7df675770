//! Admin dining table handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use table_tap_core::{QrCodeData, Table, TableId, TableStatus};

use super::RestaurantScope;
use crate::error::Result;
use crate::services::tables::{CreateTable, TableFilters, TableService, UpdateTable};
use crate::state::AppState;

/// Status-change body for `PATCH .../status`.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: TableStatus,
}

/// `POST /api/admin/tables`
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Json(payload): Json<CreateTable>,
) -> Result<Json<Table>> {
    let table = TableService::new(state.pool(), state.config())
        .create(restaurant_id, payload)
        .await?;

    tracing::info!(table = %table.id, "table created");
    Ok(Json(table))
}

/// `GET /api/admin/tables`
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Query(filters): Query<TableFilters>,
) -> Result<Json<Vec<Table>>> {
    let tables = TableService::new(state.pool(), state.config())
        .list(restaurant_id, filters)
        .await?;
    Ok(Json(tables))
}

/// `GET /api/admin/tables/{id}`
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<TableId>,
) -> Result<Json<Table>> {
    let table = TableService::new(state.pool(), state.config())
        .get(id, restaurant_id)
        .await?;
    Ok(Json(table))
}

/// `PUT /api/admin/tables/{id}`
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<TableId>,
    Json(payload): Json<UpdateTable>,
) -> Result<Json<Table>> {
    let table = TableService::new(state.pool(), state.config())
        .update(id, restaurant_id, payload)
        .await?;
    Ok(Json(table))
}

/// `PATCH /api/admin/tables/{id}/status`
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<TableId>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Table>> {
    let table = TableService::new(state.pool(), state.config())
        .set_status(id, restaurant_id, body.status)
        .await?;
    Ok(Json(table))
}

/// `DELETE /api/admin/tables/{id}`
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<TableId>,
) -> Result<Json<serde_json::Value>> {
    TableService::new(state.pool(), state.config())
        .delete(id, restaurant_id)
        .await?;

    tracing::info!(table = %id, "table deleted");
    Ok(Json(json!({ "success": true })))
}

/// `POST /api/admin/tables/{id}/qr/generate`
///
/// Also serves regeneration: the stored token is replaced, which
/// invalidates the previous QR code.
#[instrument(skip(state))]
pub async fn generate_qr(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
    Path(id): Path<TableId>,
) -> Result<Json<QrCodeData>> {
    let qr = TableService::new(state.pool(), state.config())
        .generate_qr(id, restaurant_id)
        .await?;

    tracing::info!(table = %id, "qr token generated");
    Ok(Json(qr))
}

/// `POST /api/admin/tables/qr/regenerate-all`
#[instrument(skip(state))]
pub async fn regenerate_all_qr(
    State(state): State<AppState>,
    RestaurantScope(restaurant_id): RestaurantScope,
) -> Result<Json<serde_json::Value>> {
    let regenerated = TableService::new(state.pool(), state.config())
        .regenerate_all_qr(restaurant_id)
        .await?;

    tracing::info!(count = regenerated.len(), "qr tokens regenerated");
    Ok(Json(json!({
        "count": regenerated.len(),
        "tables": regenerated,
    })))
}
