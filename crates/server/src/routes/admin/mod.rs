//! Admin route handlers.
//!
//! Every admin route is scoped to a restaurant (the tenant). The scope
//! travels in the `X-Restaurant-Id` header; requests without a valid scope
//! are rejected before reaching any service.

pub mod categories;
pub mod items;
pub mod modifiers;
pub mod tables;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

use table_tap_core::RestaurantId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the tenant scope for admin requests.
pub const RESTAURANT_HEADER: &str = "x-restaurant-id";

/// Extractor for the restaurant scope of an admin request.
pub struct RestaurantScope(pub RestaurantId);

/// Rejection when the scope header is missing or malformed.
pub struct ScopeRejection;

impl IntoResponse for ScopeRejection {
    fn into_response(self) -> Response {
        AppError::Validation(format!("missing or invalid {RESTAURANT_HEADER} header"))
            .into_response()
    }
}

impl FromRequestParts<AppState> for RestaurantScope {
    type Rejection = ScopeRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(RESTAURANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<RestaurantId>().ok())
            .ok_or(ScopeRejection)?;

        Ok(Self(id))
    }
}
