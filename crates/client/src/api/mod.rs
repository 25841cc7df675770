//! Typed REST wrappers for the TableTap backend.
//!
//! One [`ApiClient`] per backend base URL; method groups live in the
//! sibling modules:
//!
//! - [`menu`] - public menu + photo fetches
//! - [`auth`] - customer login/signup
//! - [`profile`] - profile read/patch and picture transfer
//! - [`admin`] - restaurant-scoped admin CRUD
//!
//! Errors propagate to the calling page; retry is a manual user action,
//! never automatic.

pub mod admin;
pub mod auth;
pub mod menu;
pub mod profile;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Errors from the REST wrappers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, body read, decode).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The base URL and path could not be joined.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Error envelope the backend uses for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the TableTap REST API.
///
/// Cheaply cloneable; all method groups share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client for a backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        })
    }

    /// Resolve a path against the base URL.
    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// Decode a JSON response, translating non-success statuses into
    /// [`ApiError::Status`] with the backend's message when present.
    async fn decode_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_owned());

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Read raw bytes, translating non-success statuses as in
    /// [`Self::decode_json`].
    async fn decode_bytes(response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        let url = client.url("api/menu").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/menu");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
