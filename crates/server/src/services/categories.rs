//! Menu category service.

use sqlx::PgPool;

use table_tap_core::{CategoryId, CategoryStatus, MenuCategory, RestaurantId};

use crate::db::categories::CategoryRepository;
use crate::error::{AppError, Result};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

/// Payload for creating a category.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub status: Option<CategoryStatus>,
}

/// Payload for updating a category.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub status: Option<CategoryStatus>,
}

/// Menu category service.
pub struct CategoryService<'a> {
    categories: CategoryRepository<'a>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            categories: CategoryRepository::new(pool),
        }
    }

    /// Create a category, enforcing name uniqueness within the restaurant.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a bad name, `AppError::Conflict`
    /// for a duplicate name.
    pub async fn create(
        &self,
        restaurant_id: RestaurantId,
        payload: CreateCategory,
    ) -> Result<MenuCategory> {
        validate_name(&payload.name)?;

        if self
            .categories
            .name_exists(restaurant_id, &payload.name)
            .await?
        {
            return Err(AppError::Conflict(
                "category with this name already exists".to_owned(),
            ));
        }

        let category = self
            .categories
            .create(
                restaurant_id,
                &payload.name,
                payload.description.as_deref(),
                payload.display_order.unwrap_or(0),
                payload.status.unwrap_or_default(),
            )
            .await?;

        Ok(category)
    }

    /// List all categories for the restaurant, in display order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuCategory>> {
        Ok(self.categories.list(restaurant_id).await?)
    }

    /// Update a category, re-checking the name when it changes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id, `AppError::Conflict`
    /// for a duplicate name.
    pub async fn update(
        &self,
        id: CategoryId,
        restaurant_id: RestaurantId,
        payload: UpdateCategory,
    ) -> Result<MenuCategory> {
        let existing = self
            .categories
            .get(id, restaurant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("category not found".to_owned()))?;

        let name = payload.name.unwrap_or_else(|| existing.name.clone());
        validate_name(&name)?;

        // Only re-check uniqueness when the name actually changes
        if name != existing.name && self.categories.name_exists(restaurant_id, &name).await? {
            return Err(AppError::Conflict(
                "category name already exists".to_owned(),
            ));
        }

        let category = self
            .categories
            .update(
                id,
                restaurant_id,
                &name,
                payload.description.or(existing.description).as_deref(),
                payload.display_order.unwrap_or(existing.display_order),
                payload.status.unwrap_or(existing.status),
            )
            .await?;

        Ok(category)
    }

    /// Deactivate a category (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub async fn deactivate(
        &self,
        id: CategoryId,
        restaurant_id: RestaurantId,
    ) -> Result<MenuCategory> {
        let category = self
            .categories
            .set_status(id, restaurant_id, CategoryStatus::Inactive)
            .await?;

        Ok(category)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(AppError::Validation(format!(
            "category name must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_bounds() {
        assert!(validate_name("a").is_err());
        assert!(validate_name("ab").is_ok());
        assert!(validate_name(&"x".repeat(50)).is_ok());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }
}
