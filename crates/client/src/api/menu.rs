//! Public menu fetches.

use table_tap_core::{ItemId, MenuResponse, PhotoId, TableId};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /api/menu?table&token` - the full menu snapshot for a table.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 for an invalid table/token
    /// pair, [`ApiError::Http`] on transport failure.
    pub async fn fetch_menu(
        &self,
        table: TableId,
        token: &str,
    ) -> Result<MenuResponse, ApiError> {
        let response = self
            .http()
            .get(self.url("api/menu")?)
            .query(&[("table", table.to_string()), ("token", token.to_owned())])
            .send()
            .await?;

        Self::decode_json(response).await
    }

    /// `GET /api/menu/items/{id}/photos/{photo_id}` - photo bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown photo.
    pub async fn fetch_item_photo(
        &self,
        item_id: ItemId,
        photo_id: PhotoId,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("api/menu/items/{item_id}/photos/{photo_id}"))?)
            .send()
            .await?;

        Self::decode_bytes(response).await
    }

    /// The URL a photo is served from, for building the menu store's
    /// photo-URL map without fetching the bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the path cannot be joined.
    pub fn item_photo_url(
        &self,
        item_id: ItemId,
        photo_id: PhotoId,
    ) -> Result<String, ApiError> {
        Ok(self
            .url(&format!("api/menu/items/{item_id}/photos/{photo_id}"))?
            .into())
    }
}
