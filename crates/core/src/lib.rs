//! TableTap Core - Shared types library.
//!
//! This crate provides common types used across all TableTap components:
//! - `server` - REST backend (admin CRUD, public menu, customer auth)
//! - `client` - Ordering-client library (session, cart, menu cache)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, statuses, and the wire DTOs
//!   shared between the server routes and the client wrappers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
