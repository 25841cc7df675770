//! Restaurant-scoped admin CRUD calls.
//!
//! Every request carries the tenant scope in the `X-Restaurant-Id`
//! header, mirroring the backend's admin extractor.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use table_tap_core::{
    CategoryId, CategoryStatus, ItemId, MenuCategory, MenuItem, MenuItemStatus, ModifierGroup,
    ModifierGroupId, ModifierOption, ModifierOptionId, QrCodeData, RestaurantId, SelectionType,
    Table, TableId, TableStatus,
};

use super::{ApiClient, ApiError};

/// Header carrying the tenant scope for admin requests.
const RESTAURANT_HEADER: &str = "x-restaurant-id";

/// Payload for creating or updating a table.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Filters for the admin table listing.
#[derive(Debug, Clone, Default)]
pub struct TableListFilters {
    pub status: Option<TableStatus>,
    pub location: Option<String>,
    pub sort_by: Option<String>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CategoryStatus>,
}

/// Payload for creating a menu item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub name: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    pub status: MenuItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_chef_recommended: Option<bool>,
}

/// Payload for creating a modifier group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierGroupPayload {
    pub name: String,
    pub selection_type: SelectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_select: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_select: Option<i32>,
}

/// Payload for creating a modifier option.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierOptionPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_adjustment: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

/// Admin API surface, bound to one restaurant.
#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
    restaurant_id: RestaurantId,
}

impl ApiClient {
    /// Scope the client to a restaurant for admin calls.
    #[must_use]
    pub fn admin(&self, restaurant_id: RestaurantId) -> AdminApi {
        AdminApi {
            client: self.clone(),
            restaurant_id,
        }
    }
}

impl AdminApi {
    // =========================================================================
    // Tables
    // =========================================================================

    /// `POST /api/admin/tables`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 409 for a duplicate table number.
    pub async fn create_table(&self, payload: &TablePayload) -> Result<Table, ApiError> {
        self.post_json("api/admin/tables", payload).await
    }

    /// `GET /api/admin/tables` with optional filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure.
    pub async fn list_tables(&self, filters: &TableListFilters) -> Result<Vec<Table>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = filters.status {
            query.push(("status", status_str(status).to_owned()));
        }
        if let Some(location) = &filters.location {
            query.push(("location", location.clone()));
        }
        if let Some(sort_by) = &filters.sort_by {
            query.push(("sortBy", sort_by.clone()));
        }

        let response = self
            .client
            .http()
            .get(self.client.url("api/admin/tables")?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .query(&query)
            .send()
            .await?;

        ApiClient::decode_json(response).await
    }

    /// `GET /api/admin/tables/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown table.
    pub async fn get_table(&self, id: TableId) -> Result<Table, ApiError> {
        self.get_json(&format!("api/admin/tables/{id}")).await
    }

    /// `PUT /api/admin/tables/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404/409 per the backend contract.
    pub async fn update_table(
        &self,
        id: TableId,
        payload: &TablePayload,
    ) -> Result<Table, ApiError> {
        self.put_json(&format!("api/admin/tables/{id}"), payload)
            .await
    }

    /// `PATCH /api/admin/tables/{id}/status`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown table.
    pub async fn set_table_status(
        &self,
        id: TableId,
        status: TableStatus,
    ) -> Result<Table, ApiError> {
        let response = self
            .client
            .http()
            .patch(self.client.url(&format!("api/admin/tables/{id}/status"))?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .json(&json!({ "status": status }))
            .send()
            .await?;

        ApiClient::decode_json(response).await
    }

    /// `DELETE /api/admin/tables/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown table.
    pub async fn delete_table(&self, id: TableId) -> Result<(), ApiError> {
        let response = self
            .client
            .http()
            .delete(self.client.url(&format!("api/admin/tables/{id}"))?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .send()
            .await?;

        ApiClient::decode_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// `POST /api/admin/tables/{id}/qr/generate` - provision or replace
    /// the table's QR token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown table.
    pub async fn generate_qr(&self, id: TableId) -> Result<QrCodeData, ApiError> {
        self.post_json(&format!("api/admin/tables/{id}/qr/generate"), &json!({}))
            .await
    }

    /// `POST /api/admin/tables/qr/regenerate-all`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure.
    pub async fn regenerate_all_qr(&self) -> Result<serde_json::Value, ApiError> {
        self.post_json("api/admin/tables/qr/regenerate-all", &json!({}))
            .await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// `POST /api/admin/menu/categories`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 409 for a duplicate name.
    pub async fn create_category(
        &self,
        payload: &CategoryPayload,
    ) -> Result<MenuCategory, ApiError> {
        self.post_json("api/admin/menu/categories", payload).await
    }

    /// `GET /api/admin/menu/categories`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure.
    pub async fn list_categories(&self) -> Result<Vec<MenuCategory>, ApiError> {
        self.get_json("api/admin/menu/categories").await
    }

    /// `PUT /api/admin/menu/categories/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404/409 per the backend contract.
    pub async fn update_category(
        &self,
        id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<MenuCategory, ApiError> {
        self.put_json(&format!("api/admin/menu/categories/{id}"), payload)
            .await
    }

    /// `PATCH /api/admin/menu/categories/{id}/status` - deactivate.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown category.
    pub async fn deactivate_category(&self, id: CategoryId) -> Result<MenuCategory, ApiError> {
        let response = self
            .client
            .http()
            .patch(
                self.client
                    .url(&format!("api/admin/menu/categories/{id}/status"))?,
            )
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .send()
            .await?;

        ApiClient::decode_json(response).await
    }

    // =========================================================================
    // Items & Modifiers
    // =========================================================================

    /// `POST /api/admin/menu/items`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 409 for a duplicate name.
    pub async fn create_item(&self, payload: &ItemPayload) -> Result<MenuItem, ApiError> {
        self.post_json("api/admin/menu/items", payload).await
    }

    /// `GET /api/admin/menu/items` with optional category/status filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure.
    pub async fn list_items(
        &self,
        category_id: Option<CategoryId>,
        status: Option<MenuItemStatus>,
    ) -> Result<Vec<MenuItem>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(category_id) = category_id {
            query.push(("categoryId", category_id.to_string()));
        }
        if let Some(status) = status {
            query.push(("status", item_status_str(status).to_owned()));
        }

        let response = self
            .client
            .http()
            .get(self.client.url("api/admin/menu/items")?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .query(&query)
            .send()
            .await?;

        ApiClient::decode_json(response).await
    }

    /// `GET /api/admin/menu/items/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown item.
    pub async fn get_item(&self, id: ItemId) -> Result<MenuItem, ApiError> {
        self.get_json(&format!("api/admin/menu/items/{id}")).await
    }

    /// `PUT /api/admin/menu/items/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404/409 per the backend contract.
    pub async fn update_item(
        &self,
        id: ItemId,
        payload: &ItemPayload,
    ) -> Result<MenuItem, ApiError> {
        self.put_json(&format!("api/admin/menu/items/{id}"), payload)
            .await
    }

    /// `PATCH /api/admin/menu/items/{id}/status`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown item.
    pub async fn set_item_status(
        &self,
        id: ItemId,
        status: MenuItemStatus,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .http()
            .patch(self.client.url(&format!("api/admin/menu/items/{id}/status"))?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .json(&json!({ "status": status }))
            .send()
            .await?;

        ApiClient::decode_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// `POST /api/admin/menu/items/{id}/photos` - raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 400 for an empty upload.
    pub async fn upload_item_photo(
        &self,
        id: ItemId,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .http()
            .post(self.client.url(&format!("api/admin/menu/items/{id}/photos"))?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .header(reqwest::header::CONTENT_TYPE, mime_type.to_owned())
            .body(content)
            .send()
            .await?;

        ApiClient::decode_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// `POST /api/admin/menu/items/{id}/modifier-groups`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown item.
    pub async fn create_modifier_group(
        &self,
        item_id: ItemId,
        payload: &ModifierGroupPayload,
    ) -> Result<ModifierGroup, ApiError> {
        self.post_json(
            &format!("api/admin/menu/items/{item_id}/modifier-groups"),
            payload,
        )
        .await
    }

    /// `DELETE /api/admin/modifier-groups/{id}` - removes the group and
    /// its options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown group.
    pub async fn delete_modifier_group(&self, id: ModifierGroupId) -> Result<(), ApiError> {
        let response = self
            .client
            .http()
            .delete(self.client.url(&format!("api/admin/modifier-groups/{id}"))?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .send()
            .await?;

        ApiClient::decode_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// `POST /api/admin/modifier-groups/{id}/options`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] on transport failure.
    pub async fn create_modifier_option(
        &self,
        group_id: ModifierGroupId,
        payload: &ModifierOptionPayload,
    ) -> Result<ModifierOption, ApiError> {
        self.post_json(
            &format!("api/admin/modifier-groups/{group_id}/options"),
            payload,
        )
        .await
    }

    /// `DELETE /api/admin/modifier-options/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown option.
    pub async fn delete_modifier_option(&self, id: ModifierOptionId) -> Result<(), ApiError> {
        let response = self
            .client
            .http()
            .delete(self.client.url(&format!("api/admin/modifier-options/{id}"))?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .send()
            .await?;

        ApiClient::decode_json::<serde_json::Value>(response).await?;
        Ok(())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .http()
            .get(self.client.url(path)?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .send()
            .await?;

        ApiClient::decode_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .http()
            .post(self.client.url(path)?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .json(body)
            .send()
            .await?;

        ApiClient::decode_json(response).await
    }

    async fn put_json<B: Serialize + ?Sized, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .http()
            .put(self.client.url(path)?)
            .header(RESTAURANT_HEADER, self.restaurant_id.to_string())
            .json(body)
            .send()
            .await?;

        ApiClient::decode_json(response).await
    }
}

fn status_str(status: TableStatus) -> &'static str {
    match status {
        TableStatus::Active => "active",
        TableStatus::Inactive => "inactive",
    }
}

fn item_status_str(status: MenuItemStatus) -> &'static str {
    match status {
        MenuItemStatus::Available => "available",
        MenuItemStatus::Unavailable => "unavailable",
        MenuItemStatus::SoldOut => "sold_out",
    }
}
