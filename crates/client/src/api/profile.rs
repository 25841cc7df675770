//! Profile calls (bearer auth).

use table_tap_core::{Customer, ProfilePatch};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /profile`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 for a missing/expired token.
    pub async fn get_profile(&self, token: &str) -> Result<Customer, ApiError> {
        let response = self
            .http()
            .get(self.url("profile")?)
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode_json(response).await
    }

    /// `PUT /profile` - apply a partial patch; absent fields stay
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 for a missing/expired token.
    pub async fn update_profile(
        &self,
        token: &str,
        patch: &ProfilePatch,
    ) -> Result<Customer, ApiError> {
        let response = self
            .http()
            .put(self.url("profile")?)
            .bearer_auth(token)
            .json(patch)
            .send()
            .await?;

        Self::decode_json(response).await
    }

    /// `POST /profile/picture` - raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 400 for an empty upload.
    pub async fn upload_profile_picture(
        &self,
        token: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .http()
            .post(self.url("profile/picture")?)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, mime_type.to_owned())
            .body(content)
            .send()
            .await?;

        Self::decode_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// `GET /profile/picture` - picture bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 when no picture is stored.
    pub async fn get_profile_picture(&self, token: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http()
            .get(self.url("profile/picture")?)
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode_bytes(response).await
    }
}
