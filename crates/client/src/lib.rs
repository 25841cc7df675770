//! TableTap ordering-client library.
//!
//! The state layer of the QR ordering app, reframed as explicitly
//! constructed store objects with browsing-session lifetime:
//!
//! - [`stores::SessionStore`] - who is browsing (anonymous, guest, or
//!   authenticated) plus the QR/table entry context
//! - [`stores::CartStore`] - the ordered list of cart lines and their
//!   computed totals
//! - [`stores::MenuStore`] - the cached menu snapshot for a table, with a
//!   fixed freshness window and derived best-seller/recommended views
//!
//! Stores never fetch: the [`api`] wrappers issue the HTTP calls and the
//! page flow hands results to the stores. Persistence goes through the
//! [`storage::SessionStorage`] trait so the stores stay testable without
//! a browser runtime.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod storage;
pub mod stores;

pub use api::{ApiClient, ApiError};
pub use storage::{MemoryStorage, SessionStorage};
pub use stores::{CartStore, MenuStore, SessionMode, SessionStore};
