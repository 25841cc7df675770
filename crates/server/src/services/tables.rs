//! Dining table service, including QR token provisioning.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sqlx::PgPool;

use table_tap_core::{QrCodeData, RestaurantId, Table, TableId, TableStatus};

use crate::config::ServerConfig;
use crate::db::tables::{TableRepository, TableSort};
use crate::error::{AppError, Result};

/// Entropy bytes in a table QR token (128-bit).
const QR_TOKEN_BYTES: usize = 16;

/// Payload for creating a table.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTable {
    pub table_number: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Payload for updating a table.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTable {
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Filters accepted by the admin table listing.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFilters {
    #[serde(default)]
    pub status: Option<TableStatus>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
}

/// Dining table service.
pub struct TableService<'a> {
    tables: TableRepository<'a>,
    config: &'a ServerConfig,
}

impl<'a> TableService<'a> {
    /// Create a new table service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, config: &'a ServerConfig) -> Self {
        Self {
            tables: TableRepository::new(pool),
            config,
        }
    }

    /// Create a table, enforcing number uniqueness within the restaurant.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty number,
    /// `AppError::Conflict` for a duplicate.
    pub async fn create(
        &self,
        restaurant_id: RestaurantId,
        payload: CreateTable,
    ) -> Result<Table> {
        if payload.table_number.trim().is_empty() {
            return Err(AppError::Validation("table number is required".to_owned()));
        }

        let row = self
            .tables
            .create(
                restaurant_id,
                payload.table_number.trim(),
                payload.location.as_deref(),
            )
            .await?;

        Ok(row.into())
    }

    /// Get a table by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub async fn get(&self, id: TableId, restaurant_id: RestaurantId) -> Result<Table> {
        self.tables
            .get(id, restaurant_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("table not found".to_owned()))
    }

    /// List tables with optional filters.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(
        &self,
        restaurant_id: RestaurantId,
        filters: TableFilters,
    ) -> Result<Vec<Table>> {
        let sort = match filters.sort_by.as_deref() {
            Some("location") => TableSort::Location,
            Some("status") => TableSort::Status,
            _ => TableSort::TableNumber,
        };

        let rows = self
            .tables
            .list(
                restaurant_id,
                filters.status,
                filters.location.as_deref(),
                sort,
            )
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update a table's number and location.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id, `AppError::Conflict`
    /// for a duplicate number.
    pub async fn update(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
        payload: UpdateTable,
    ) -> Result<Table> {
        let existing = self
            .tables
            .get(id, restaurant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("table not found".to_owned()))?;

        let table_number = payload
            .table_number
            .unwrap_or_else(|| existing.table_number.clone());
        if table_number.trim().is_empty() {
            return Err(AppError::Validation("table number is required".to_owned()));
        }

        let row = self
            .tables
            .update(
                id,
                restaurant_id,
                table_number.trim(),
                payload.location.or(existing.location).as_deref(),
            )
            .await?;

        Ok(row.into())
    }

    /// Set a table's status.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub async fn set_status(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
        status: TableStatus,
    ) -> Result<Table> {
        let row = self.tables.set_status(id, restaurant_id, status).await?;
        Ok(row.into())
    }

    /// Delete a table.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub async fn delete(&self, id: TableId, restaurant_id: RestaurantId) -> Result<()> {
        Ok(self.tables.delete(id, restaurant_id).await?)
    }

    // =========================================================================
    // QR Tokens
    // =========================================================================

    /// Provision (or replace) a table's QR token.
    ///
    /// Regeneration invalidates the previous token: the stored value is
    /// replaced as a unit, so in-flight menus keyed by the old token stop
    /// resolving on their next fetch.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub async fn generate_qr(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
    ) -> Result<QrCodeData> {
        let token = generate_qr_token();
        let row = self.tables.set_qr_token(id, restaurant_id, &token).await?;

        Ok(QrCodeData {
            table_id: row.id,
            url: self.config.qr_entry_url(&row.id.to_string(), &token),
            token,
        })
    }

    /// Regenerate QR tokens for every active table.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if any update fails.
    pub async fn regenerate_all_qr(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<QrCodeData>> {
        let ids = self.tables.list_active_ids(restaurant_id).await?;

        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            out.push(self.generate_qr(id, restaurant_id).await?);
        }
        Ok(out)
    }
}

/// Generate a random URL-safe QR token.
fn generate_qr_token() -> String {
    let mut bytes = [0u8; QR_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_tokens_are_unique() {
        assert_ne!(generate_qr_token(), generate_qr_token());
    }

    #[test]
    fn test_qr_token_is_urlsafe() {
        let token = generate_qr_token();
        assert!(!token.contains('+') && !token.contains('/') && !token.contains('='));
    }
}
