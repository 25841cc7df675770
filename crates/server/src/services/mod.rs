//! Business services, one per entity.
//!
//! Each service wraps its repository with the checks the REST surface
//! promises: existence and tenant-scoped uniqueness before a save, typed
//! errors the route layer translates to HTTP status codes.

pub mod auth;
pub mod categories;
pub mod items;
pub mod profile;
pub mod tables;
