//! Customer auth calls.

use serde::Serialize;

use table_tap_core::AuthResponse;

use super::{ApiClient, ApiError};

/// Signup request payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// `POST /auth/customer/login` - exchange credentials for a bearer
    /// token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 for bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .http()
            .post(self.url("auth/customer/login")?)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        Self::decode_json(response).await
    }

    /// `POST /auth/customer/signup` - register and receive a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 409 for an already-registered
    /// email, 400 for validation failures.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        let response = self
            .http()
            .post(self.url("auth/customer/signup")?)
            .json(request)
            .send()
            .await?;

        Self::decode_json(response).await
    }
}
