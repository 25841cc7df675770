//! Dining table repository.

use sqlx::PgPool;

use table_tap_core::{RestaurantId, Table, TableContext, TableId, TableStatus};

use super::RepositoryError;

/// Database row for a dining table, including the QR token.
///
/// The token never leaves the db/service layers; the wire [`Table`] only
/// exposes whether one is provisioned.
#[derive(sqlx::FromRow)]
pub struct TableRow {
    pub id: TableId,
    pub restaurant_id: RestaurantId,
    pub table_number: String,
    pub location: Option<String>,
    pub status: TableStatus,
    pub qr_token: Option<String>,
}

impl From<TableRow> for Table {
    fn from(row: TableRow) -> Self {
        Self {
            id: row.id,
            restaurant_id: row.restaurant_id,
            table_number: row.table_number,
            location: row.location,
            status: row.status,
            has_qr_token: row.qr_token.is_some(),
        }
    }
}

impl TableRow {
    /// The table context handed to the ordering client after QR entry.
    #[must_use]
    pub fn context(&self) -> TableContext {
        TableContext {
            table_id: self.id,
            restaurant_id: self.restaurant_id,
            table_number: self.table_number.clone(),
        }
    }
}

/// Sort keys accepted by the admin table listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableSort {
    #[default]
    TableNumber,
    Location,
    Status,
}

const TABLE_COLUMNS: &str = "id, restaurant_id, table_number, location, status, qr_token";

/// Repository for dining table database operations.
pub struct TableRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TableRepository<'a> {
    /// Create a new table repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the table number is already
    /// taken within the restaurant.
    pub async fn create(
        &self,
        restaurant_id: RestaurantId,
        table_number: &str,
        location: Option<&str>,
    ) -> Result<TableRow, RepositoryError> {
        let row = sqlx::query_as::<_, TableRow>(&format!(
            r"
            INSERT INTO dining_table (restaurant_id, table_number, location)
            VALUES ($1, $2, $3)
            RETURNING {TABLE_COLUMNS}
            ",
        ))
        .bind(restaurant_id)
        .bind(table_number)
        .bind(location)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "table number already exists"))?;

        Ok(row)
    }

    /// Get a table by id within a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<TableRow>, RepositoryError> {
        let row = sqlx::query_as::<_, TableRow>(&format!(
            "SELECT {TABLE_COLUMNS} FROM dining_table WHERE id = $1 AND restaurant_id = $2",
        ))
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Resolve a table by id + QR token, the pair presented at menu entry.
    ///
    /// Only active tables resolve; a regenerated token invalidates the old
    /// one because the stored token is replaced.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_token(
        &self,
        id: TableId,
        qr_token: &str,
    ) -> Result<Option<TableRow>, RepositoryError> {
        let row = sqlx::query_as::<_, TableRow>(&format!(
            r"
            SELECT {TABLE_COLUMNS}
            FROM dining_table
            WHERE id = $1 AND qr_token = $2 AND status = 'active'
            ",
        ))
        .bind(id)
        .bind(qr_token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// List tables for a restaurant with optional filters.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        restaurant_id: RestaurantId,
        status: Option<TableStatus>,
        location: Option<&str>,
        sort: TableSort,
    ) -> Result<Vec<TableRow>, RepositoryError> {
        let order_by = match sort {
            TableSort::TableNumber => "table_number ASC",
            TableSort::Location => "location ASC NULLS LAST, table_number ASC",
            TableSort::Status => "status ASC, table_number ASC",
        };

        let rows = sqlx::query_as::<_, TableRow>(&format!(
            r"
            SELECT {TABLE_COLUMNS}
            FROM dining_table
            WHERE restaurant_id = $1
              AND ($2::table_status IS NULL OR status = $2)
              AND ($3::text IS NULL OR location = $3)
            ORDER BY {order_by}
            ",
        ))
        .bind(restaurant_id)
        .bind(status)
        .bind(location)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List ids of all active tables (used by QR regenerate-all).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_ids(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<TableId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, TableId>(
            "SELECT id FROM dining_table WHERE restaurant_id = $1 AND status = 'active'",
        )
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Update a table's number and location.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the table doesn't exist, or
    /// `RepositoryError::Conflict` on a duplicate table number.
    pub async fn update(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
        table_number: &str,
        location: Option<&str>,
    ) -> Result<TableRow, RepositoryError> {
        let row = sqlx::query_as::<_, TableRow>(&format!(
            r"
            UPDATE dining_table
            SET table_number = $3, location = $4, updated_at = now()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING {TABLE_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(restaurant_id)
        .bind(table_number)
        .bind(location)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "table number already exists"))?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Set a table's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the table doesn't exist.
    pub async fn set_status(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
        status: TableStatus,
    ) -> Result<TableRow, RepositoryError> {
        let row = sqlx::query_as::<_, TableRow>(&format!(
            r"
            UPDATE dining_table
            SET status = $3, updated_at = now()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING {TABLE_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(restaurant_id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// Delete a table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the table doesn't exist.
    pub async fn delete(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM dining_table WHERE id = $1 AND restaurant_id = $2")
            .bind(id)
            .bind(restaurant_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Replace a table's QR token, invalidating any previous one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the table doesn't exist.
    pub async fn set_qr_token(
        &self,
        id: TableId,
        restaurant_id: RestaurantId,
        qr_token: &str,
    ) -> Result<TableRow, RepositoryError> {
        let row = sqlx::query_as::<_, TableRow>(&format!(
            r"
            UPDATE dining_table
            SET qr_token = $3, updated_at = now()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING {TABLE_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(restaurant_id)
        .bind(qr_token)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }
}
