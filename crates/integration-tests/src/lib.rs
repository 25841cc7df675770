//! Integration tests for TableTap.
//!
//! # Running Tests
//!
//! The client-store tests run standalone:
//!
//! ```bash
//! cargo test -p table-tap-integration-tests
//! ```
//!
//! The HTTP flow tests are `#[ignore]`d and require a running server with
//! a migrated, seeded database:
//!
//! ```bash
//! cargo run -p table-tap-cli -- migrate
//! cargo run -p table-tap-cli -- seed
//! cargo run -p table-tap-server &
//! cargo test -p table-tap-integration-tests -- --ignored
//! ```
//!
//! Configuration via environment:
//! - `TABLETAP_TEST_BASE_URL` - server base URL (default: `http://localhost:3000`)
//! - `TABLETAP_TEST_RESTAURANT_ID` - tenant to run admin calls against

/// Base URL for the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("TABLETAP_TEST_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
}
