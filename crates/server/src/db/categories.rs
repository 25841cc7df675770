//! Menu category repository.

use sqlx::PgPool;

use table_tap_core::{CategoryId, CategoryStatus, MenuCategory, RestaurantId};

use super::RepositoryError;

/// Database row for a menu category.
#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    restaurant_id: RestaurantId,
    name: String,
    description: Option<String>,
    display_order: i32,
    status: CategoryStatus,
}

impl From<CategoryRow> for MenuCategory {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            restaurant_id: row.restaurant_id,
            name: row.name,
            description: row.description,
            display_order: row.display_order,
            status: row.status,
        }
    }
}

/// Repository for menu category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken
    /// within the restaurant.
    pub async fn create(
        &self,
        restaurant_id: RestaurantId,
        name: &str,
        description: Option<&str>,
        display_order: i32,
        status: CategoryStatus,
    ) -> Result<MenuCategory, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO menu_category (restaurant_id, name, description, display_order, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, restaurant_id, name, description, display_order, status
            ",
        )
        .bind(restaurant_id)
        .bind(name)
        .bind(description)
        .bind(display_order)
        .bind(status)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category name already exists"))?;

        Ok(row.into())
    }

    /// Get a category by id within a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: CategoryId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<MenuCategory>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, restaurant_id, name, description, display_order, status
            FROM menu_category
            WHERE id = $1 AND restaurant_id = $2
            ",
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Whether a category name is already used within a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn name_exists(
        &self,
        restaurant_id: RestaurantId,
        name: &str,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM menu_category WHERE restaurant_id = $1 AND name = $2)",
        )
        .bind(restaurant_id)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// List all categories for a restaurant, ordered for display.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<MenuCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, restaurant_id, name, description, display_order, status
            FROM menu_category
            WHERE restaurant_id = $1
            ORDER BY display_order ASC, name ASC
            ",
        )
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List active categories for the public menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<MenuCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT id, restaurant_id, name, description, display_order, status
            FROM menu_category
            WHERE restaurant_id = $1 AND status = 'active'
            ORDER BY display_order ASC, name ASC
            ",
        )
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Update a category's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist,
    /// or `RepositoryError::Conflict` on a duplicate name.
    pub async fn update(
        &self,
        id: CategoryId,
        restaurant_id: RestaurantId,
        name: &str,
        description: Option<&str>,
        display_order: i32,
        status: CategoryStatus,
    ) -> Result<MenuCategory, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE menu_category
            SET name = $3, description = $4, display_order = $5, status = $6, updated_at = now()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING id, restaurant_id, name, description, display_order, status
            ",
        )
        .bind(id)
        .bind(restaurant_id)
        .bind(name)
        .bind(description)
        .bind(display_order)
        .bind(status)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "category name already exists"))?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Set a category's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category doesn't exist.
    pub async fn set_status(
        &self,
        id: CategoryId,
        restaurant_id: RestaurantId,
        status: CategoryStatus,
    ) -> Result<MenuCategory, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE menu_category
            SET status = $3, updated_at = now()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING id, restaurant_id, name, description, display_order, status
            ",
        )
        .bind(id)
        .bind(restaurant_id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }
}
