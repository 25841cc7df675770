//! Menu item service, including modifier groups/options and photos.

use rust_decimal::Decimal;
use sqlx::PgPool;

use table_tap_core::{
    CategoryId, ItemId, MenuItem, MenuItemStatus, ModifierGroup, ModifierGroupId, ModifierOption,
    ModifierOptionId, PhotoId, Price, RestaurantId, SelectionType,
};

use crate::db::categories::CategoryRepository;
use crate::db::items::{ItemRepository, PhotoRecord};
use crate::error::{AppError, Result};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 80;

/// Payload for creating a menu item.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateItem {
    pub name: String,
    pub category_id: CategoryId,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<i32>,
    pub status: MenuItemStatus,
    #[serde(default)]
    pub is_chef_recommended: Option<bool>,
}

/// Payload for updating a menu item.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub prep_time_minutes: Option<i32>,
    #[serde(default)]
    pub status: Option<MenuItemStatus>,
    #[serde(default)]
    pub is_chef_recommended: Option<bool>,
}

/// Payload for creating a modifier group on an item.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateModifierGroup {
    pub name: String,
    pub selection_type: SelectionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_select: Option<i32>,
    #[serde(default)]
    pub max_select: Option<i32>,
}

/// Payload for creating a modifier option in a group.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateModifierOption {
    pub name: String,
    #[serde(default)]
    pub price_adjustment: Option<Decimal>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub display_order: Option<i32>,
}

/// Menu item service.
pub struct ItemService<'a> {
    items: ItemRepository<'a>,
    categories: CategoryRepository<'a>,
}

impl<'a> ItemService<'a> {
    /// Create a new item service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            items: ItemRepository::new(pool),
            categories: CategoryRepository::new(pool),
        }
    }

    /// Create a menu item after checking its category and name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a bad name or non-positive price,
    /// `AppError::NotFound` for an unknown category, `AppError::Conflict`
    /// for a duplicate name.
    pub async fn create(
        &self,
        restaurant_id: RestaurantId,
        payload: CreateItem,
    ) -> Result<MenuItem> {
        validate_name(&payload.name)?;
        let price = parse_price(payload.price)?;

        if self
            .categories
            .get(payload.category_id, restaurant_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("category not found".to_owned()));
        }

        if self.items.name_exists(restaurant_id, &payload.name).await? {
            return Err(AppError::Conflict(
                "item with this name already exists".to_owned(),
            ));
        }

        let item = self
            .items
            .create(
                restaurant_id,
                payload.category_id,
                &payload.name,
                payload.description.as_deref(),
                price,
                payload.status,
                payload.is_chef_recommended.unwrap_or(false),
                payload.prep_time_minutes,
            )
            .await?;

        Ok(item)
    }

    /// Get a single item with its modifier groups.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub async fn get(&self, id: ItemId, restaurant_id: RestaurantId) -> Result<MenuItem> {
        self.items
            .get(id, restaurant_id)
            .await?
            .ok_or_else(|| AppError::NotFound("item not found".to_owned()))
    }

    /// List items, optionally filtered by category and status.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(
        &self,
        restaurant_id: RestaurantId,
        category_id: Option<CategoryId>,
        status: Option<MenuItemStatus>,
    ) -> Result<Vec<MenuItem>> {
        Ok(self.items.list(restaurant_id, category_id, status).await?)
    }

    /// Update an item, re-checking name and category when they change.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id or category,
    /// `AppError::Conflict` for a duplicate name.
    pub async fn update(
        &self,
        id: ItemId,
        restaurant_id: RestaurantId,
        payload: UpdateItem,
    ) -> Result<MenuItem> {
        let existing = self.get(id, restaurant_id).await?;

        let name = payload.name.unwrap_or_else(|| existing.name.clone());
        validate_name(&name)?;

        if name != existing.name && self.items.name_exists(restaurant_id, &name).await? {
            return Err(AppError::Conflict("item name already exists".to_owned()));
        }

        let category_id = payload.category_id.unwrap_or(existing.category_id);
        if category_id != existing.category_id
            && self
                .categories
                .get(category_id, restaurant_id)
                .await?
                .is_none()
        {
            return Err(AppError::NotFound("category not found".to_owned()));
        }

        let price = match payload.price {
            Some(p) => parse_price(p)?,
            None => existing.price,
        };

        let item = self
            .items
            .update(
                id,
                restaurant_id,
                category_id,
                &name,
                payload.description.or(existing.description).as_deref(),
                price,
                payload.status.unwrap_or(existing.status),
                payload
                    .is_chef_recommended
                    .unwrap_or(existing.is_chef_recommended),
                payload.prep_time_minutes.or(existing.prep_time_minutes),
            )
            .await?;

        Ok(item)
    }

    /// Set an item's availability status.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id.
    pub async fn set_status(
        &self,
        id: ItemId,
        restaurant_id: RestaurantId,
        status: MenuItemStatus,
    ) -> Result<()> {
        Ok(self.items.set_status(id, restaurant_id, status).await?)
    }

    // =========================================================================
    // Modifier Groups & Options
    // =========================================================================

    /// Add a modifier group to an item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown item,
    /// `AppError::Validation` for inconsistent selection bounds.
    pub async fn add_modifier_group(
        &self,
        item_id: ItemId,
        restaurant_id: RestaurantId,
        payload: CreateModifierGroup,
    ) -> Result<ModifierGroup> {
        // Ensure the item exists within this restaurant
        self.get(item_id, restaurant_id).await?;

        let min_select = payload.min_select.unwrap_or(0);
        let max_select = payload
            .max_select
            .unwrap_or(match payload.selection_type {
                SelectionType::Single => 1,
                SelectionType::Multiple => i32::MAX,
            });

        if min_select < 0 || max_select < min_select {
            return Err(AppError::Validation(
                "selection bounds must satisfy 0 <= min <= max".to_owned(),
            ));
        }
        if payload.selection_type == SelectionType::Single && max_select != 1 {
            return Err(AppError::Validation(
                "single-selection groups must have max_select = 1".to_owned(),
            ));
        }

        let group = self
            .items
            .create_modifier_group(
                item_id,
                &payload.name,
                payload.selection_type,
                payload.required,
                min_select,
                max_select,
            )
            .await?;

        Ok(group)
    }

    /// Remove a modifier group and its options.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown group.
    pub async fn remove_modifier_group(&self, group_id: ModifierGroupId) -> Result<()> {
        Ok(self.items.delete_modifier_group(group_id).await?)
    }

    /// Add an option to a modifier group.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the insert fails.
    pub async fn add_modifier_option(
        &self,
        group_id: ModifierGroupId,
        payload: CreateModifierOption,
    ) -> Result<ModifierOption> {
        let option = self
            .items
            .create_modifier_option(
                group_id,
                &payload.name,
                payload.price_adjustment.unwrap_or(Decimal::ZERO),
                payload.is_default,
                payload.display_order.unwrap_or(0),
            )
            .await?;

        Ok(option)
    }

    /// Remove a modifier option.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown option.
    pub async fn remove_modifier_option(&self, option_id: ModifierOptionId) -> Result<()> {
        Ok(self.items.delete_modifier_option(option_id).await?)
    }

    // =========================================================================
    // Photos
    // =========================================================================

    /// Store a photo for an item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty upload,
    /// `AppError::NotFound` for an unknown item.
    pub async fn add_photo(
        &self,
        item_id: ItemId,
        restaurant_id: RestaurantId,
        content: &[u8],
        mime_type: &str,
    ) -> Result<PhotoId> {
        if content.is_empty() {
            return Err(AppError::Validation("no file provided".to_owned()));
        }

        self.get(item_id, restaurant_id).await?;

        Ok(self.items.add_photo(item_id, content, mime_type).await?)
    }

    /// Fetch a photo's bytes and content type.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown item/photo pair.
    pub async fn get_photo(&self, item_id: ItemId, photo_id: PhotoId) -> Result<PhotoRecord> {
        self.items
            .get_photo(item_id, photo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("photo not found".to_owned()))
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(AppError::Validation(format!(
            "item name must be between {NAME_MIN} and {NAME_MAX} characters"
        )));
    }
    Ok(())
}

fn parse_price(amount: Decimal) -> Result<Price> {
    Price::new(amount).map_err(|e| AppError::Validation(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_bounds() {
        assert!(validate_name("x").is_err());
        assert!(validate_name("ok").is_ok());
        assert!(validate_name(&"x".repeat(80)).is_ok());
        assert!(validate_name(&"x".repeat(81)).is_err());
    }

    #[test]
    fn test_parse_price_rejects_non_positive() {
        assert!(parse_price(Decimal::ZERO).is_err());
        assert!(parse_price("-2".parse().unwrap()).is_err());
        assert!(parse_price("0.01".parse().unwrap()).is_ok());
    }
}
