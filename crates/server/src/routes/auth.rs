//! Customer authentication route handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use table_tap_core::AuthResponse;

use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// `POST /auth/customer/login`
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.config().token_ttl_hours);
    let response = auth.login(&body.email, &body.password).await?;

    tracing::info!(customer = %response.user.id, "customer logged in");
    Ok(Json(response))
}

/// `POST /auth/customer/signup`
#[instrument(skip(state, body))]
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.config().token_ttl_hours);
    let response = auth
        .signup(
            &body.email,
            &body.password,
            body.first_name.as_deref(),
            body.last_name.as_deref(),
        )
        .await?;

    tracing::info!(customer = %response.user.id, "customer signed up");
    Ok(Json(response))
}
