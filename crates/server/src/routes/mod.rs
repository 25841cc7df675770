//! HTTP route handlers for the REST backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (verifies database)
//!
//! # Public menu (table + QR token as entry credential)
//! GET  /api/menu?table&token                    - Full menu snapshot for a table
//! GET  /api/menu/items/{id}/photos/{photo_id}   - Item photo bytes
//!
//! # Customer auth
//! POST /auth/customer/login      - Password login, returns bearer token
//! POST /auth/customer/signup     - Registration, returns bearer token
//!
//! # Profile (bearer auth)
//! GET  /profile                  - Profile projection
//! PUT  /profile                  - Partial profile patch
//! POST /profile/picture          - Upload picture bytes
//! GET  /profile/picture          - Fetch picture bytes
//!
//! # Admin (X-Restaurant-Id scoped)
//! POST   /api/admin/menu/categories
//! GET    /api/admin/menu/categories
//! PUT    /api/admin/menu/categories/{id}
//! PATCH  /api/admin/menu/categories/{id}/status
//! POST   /api/admin/menu/items
//! GET    /api/admin/menu/items
//! GET    /api/admin/menu/items/{id}
//! PUT    /api/admin/menu/items/{id}
//! PATCH  /api/admin/menu/items/{id}/status
//! POST   /api/admin/menu/items/{id}/photos
//! POST   /api/admin/menu/items/{id}/modifier-groups
//! DELETE /api/admin/modifier-groups/{id}
//! POST   /api/admin/modifier-groups/{id}/options
//! DELETE /api/admin/modifier-options/{id}
//! POST   /api/admin/tables
//! GET    /api/admin/tables
//! GET    /api/admin/tables/{id}
//! PUT    /api/admin/tables/{id}
//! PATCH  /api/admin/tables/{id}/status
//! DELETE /api/admin/tables/{id}
//! POST   /api/admin/tables/{id}/qr/generate
//! POST   /api/admin/tables/{id}/qr/regenerate
//! POST   /api/admin/tables/qr/regenerate-all
//! ```

pub mod admin;
pub mod auth;
pub mod menu;
pub mod profile;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the public menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::get_menu))
        .route("/items/{id}/photos/{photo_id}", get(menu::get_item_photo))
}

/// Create the customer auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get_profile).put(profile::update_profile))
        .route(
            "/picture",
            get(profile::get_picture).post(profile::upload_picture),
        )
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // Menu categories
        .route(
            "/menu/categories",
            post(admin::categories::create).get(admin::categories::list),
        )
        .route("/menu/categories/{id}", put(admin::categories::update))
        .route(
            "/menu/categories/{id}/status",
            axum::routing::patch(admin::categories::deactivate),
        )
        // Menu items
        .route(
            "/menu/items",
            post(admin::items::create).get(admin::items::list),
        )
        .route(
            "/menu/items/{id}",
            get(admin::items::get).put(admin::items::update),
        )
        .route(
            "/menu/items/{id}/status",
            axum::routing::patch(admin::items::set_status),
        )
        .route("/menu/items/{id}/photos", post(admin::items::upload_photo))
        // Modifiers
        .route(
            "/menu/items/{id}/modifier-groups",
            post(admin::modifiers::create_group),
        )
        .route(
            "/modifier-groups/{id}",
            delete(admin::modifiers::delete_group),
        )
        .route(
            "/modifier-groups/{id}/options",
            post(admin::modifiers::create_option),
        )
        .route(
            "/modifier-options/{id}",
            delete(admin::modifiers::delete_option),
        )
        // Tables
        .route(
            "/tables",
            post(admin::tables::create).get(admin::tables::list),
        )
        .route(
            "/tables/{id}",
            get(admin::tables::get)
                .put(admin::tables::update)
                .delete(admin::tables::delete),
        )
        .route(
            "/tables/{id}/status",
            axum::routing::patch(admin::tables::set_status),
        )
        .route("/tables/{id}/qr/generate", post(admin::tables::generate_qr))
        .route(
            "/tables/{id}/qr/regenerate",
            post(admin::tables::generate_qr),
        )
        .route(
            "/tables/qr/regenerate-all",
            post(admin::tables::regenerate_all_qr),
        )
}

/// Create all routes for the REST backend.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/menu", menu_routes())
        .nest("/api/admin", admin_routes())
        .nest("/auth/customer", auth_routes())
        .nest("/profile", profile_routes())
}
