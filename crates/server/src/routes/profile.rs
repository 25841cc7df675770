//! Customer profile route handlers (bearer auth required).

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::instrument;

use table_tap_core::{Customer, ProfilePatch};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::profile::ProfileService;
use crate::state::AppState;

/// `GET /profile`
#[instrument(skip(state, customer))]
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Customer>> {
    let profile = ProfileService::new(state.pool()).get(customer.id).await?;
    Ok(Json(profile))
}

/// `PUT /profile`
///
/// Accepts a partial patch; only present fields are applied.
#[instrument(skip(state, customer, patch))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<Customer>> {
    let profile = ProfileService::new(state.pool())
        .update(customer.id, patch)
        .await?;
    Ok(Json(profile))
}

/// `POST /profile/picture`
///
/// Raw image bytes in the request body.
#[instrument(skip(state, customer, body))]
pub async fn upload_picture(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    ProfileService::new(state.pool())
        .upload_picture(customer.id, &body)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "profile picture updated",
    })))
}

/// `GET /profile/picture`
#[instrument(skip(state, customer))]
pub async fn get_picture(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Response> {
    let bytes = ProfileService::new(state.pool())
        .get_picture(customer.id)
        .await?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}
