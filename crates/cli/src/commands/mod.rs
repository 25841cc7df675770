//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Load the database URL from the environment.
///
/// Accepts `TABLETAP_DATABASE_URL` with a fallback to `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    std::env::var("TABLETAP_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "TABLETAP_DATABASE_URL not set".into())
}
