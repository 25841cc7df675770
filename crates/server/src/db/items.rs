//! Menu item repository, including modifier groups/options and photos.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;

use table_tap_core::{
    CategoryId, ItemId, MenuItem, MenuItemStatus, ModifierGroup, ModifierGroupId, ModifierOption,
    ModifierOptionId, PhotoId, Price, RestaurantId, SelectionType,
};

use super::RepositoryError;

/// Database row for a menu item (modifier groups loaded separately).
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: ItemId,
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    price: Price,
    status: MenuItemStatus,
    is_chef_recommended: bool,
    popularity_score: i64,
    prep_time_minutes: Option<i32>,
    primary_photo_id: Option<PhotoId>,
}

impl ItemRow {
    fn into_item(self, modifier_groups: Vec<ModifierGroup>) -> MenuItem {
        MenuItem {
            id: self.id,
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: self.price,
            status: self.status,
            is_chef_recommended: self.is_chef_recommended,
            popularity_score: self.popularity_score,
            prep_time_minutes: self.prep_time_minutes,
            primary_photo_id: self.primary_photo_id,
            modifier_groups,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GroupRow {
    id: ModifierGroupId,
    item_id: ItemId,
    name: String,
    selection_type: SelectionType,
    required: bool,
    min_select: i32,
    max_select: i32,
}

#[derive(sqlx::FromRow)]
struct OptionRow {
    id: ModifierOptionId,
    group_id: ModifierGroupId,
    name: String,
    price_adjustment: Decimal,
    is_default: bool,
    display_order: i32,
}

/// A stored photo with its content type.
#[derive(sqlx::FromRow)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub item_id: ItemId,
    pub content: Vec<u8>,
    pub mime_type: String,
}

const ITEM_COLUMNS: &str = "id, category_id, name, description, price, status, \
                            is_chef_recommended, popularity_score, prep_time_minutes, \
                            primary_photo_id";

/// Repository for menu item database operations.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new menu item (no modifier groups yet).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken
    /// within the restaurant.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        restaurant_id: RestaurantId,
        category_id: CategoryId,
        name: &str,
        description: Option<&str>,
        price: Price,
        status: MenuItemStatus,
        is_chef_recommended: bool,
        prep_time_minutes: Option<i32>,
    ) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r"
            INSERT INTO menu_item
                (restaurant_id, category_id, name, description, price, status,
                 is_chef_recommended, prep_time_minutes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ITEM_COLUMNS}
            ",
        ))
        .bind(restaurant_id)
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(status)
        .bind(is_chef_recommended)
        .bind(prep_time_minutes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "item name already exists"))?;

        Ok(row.into_item(Vec::new()))
    }

    /// Get a single item with its modifier groups.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: ItemId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM menu_item WHERE id = $1 AND restaurant_id = $2",
        ))
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };

        let mut groups = self.load_modifier_groups(&[row.id]).await?;
        let item_groups = groups.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_item(item_groups)))
    }

    /// List items for a restaurant, optionally filtered by category and
    /// status, with modifier groups attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        restaurant_id: RestaurantId,
        category_id: Option<CategoryId>,
        status: Option<MenuItemStatus>,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            r"
            SELECT {ITEM_COLUMNS}
            FROM menu_item
            WHERE restaurant_id = $1
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::menu_item_status IS NULL OR status = $3)
            ORDER BY name ASC
            ",
        ))
        .bind(restaurant_id)
        .bind(category_id)
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        self.attach_groups(rows).await
    }

    /// List every item for the public menu, ordered by popularity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_menu(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            r"
            SELECT {ITEM_COLUMNS}
            FROM menu_item
            WHERE restaurant_id = $1
            ORDER BY popularity_score DESC, name ASC
            ",
        ))
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        self.attach_groups(rows).await
    }

    /// Update an item's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist, or
    /// `RepositoryError::Conflict` on a duplicate name.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: ItemId,
        restaurant_id: RestaurantId,
        category_id: CategoryId,
        name: &str,
        description: Option<&str>,
        price: Price,
        status: MenuItemStatus,
        is_chef_recommended: bool,
        prep_time_minutes: Option<i32>,
    ) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r"
            UPDATE menu_item
            SET category_id = $3, name = $4, description = $5, price = $6, status = $7,
                is_chef_recommended = $8, prep_time_minutes = $9, updated_at = now()
            WHERE id = $1 AND restaurant_id = $2
            RETURNING {ITEM_COLUMNS}
            ",
        ))
        .bind(id)
        .bind(restaurant_id)
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(status)
        .bind(is_chef_recommended)
        .bind(prep_time_minutes)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "item name already exists"))?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound);
        };

        let mut groups = self.load_modifier_groups(&[row.id]).await?;
        let item_groups = groups.remove(&row.id).unwrap_or_default();
        Ok(row.into_item(item_groups))
    }

    /// Set an item's availability status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    pub async fn set_status(
        &self,
        id: ItemId,
        restaurant_id: RestaurantId,
        status: MenuItemStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE menu_item
            SET status = $3, updated_at = now()
            WHERE id = $1 AND restaurant_id = $2
            ",
        )
        .bind(id)
        .bind(restaurant_id)
        .bind(status)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Whether an item name is already used within a restaurant.
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
            "SELECT EXISTS (SELECT 1 FROM menu_item WHERE restaurant_id = $1 AND name = $2)",
        )
        .bind(restaurant_id)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    // =========================================================================
    // Modifier Groups & Options
    // =========================================================================

    /// Insert a modifier group for an item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_modifier_group(
        &self,
        item_id: ItemId,
        name: &str,
        selection_type: SelectionType,
        required: bool,
        min_select: i32,
        max_select: i32,
    ) -> Result<ModifierGroup, RepositoryError> {
        let row = sqlx::query_as::<_, GroupRow>(
            r"
            INSERT INTO modifier_group (item_id, name, selection_type, required, min_select, max_select)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, item_id, name, selection_type, required, min_select, max_select
            ",
        )
        .bind(item_id)
        .bind(name)
        .bind(selection_type)
        .bind(required)
        .bind(min_select)
        .bind(max_select)
        .fetch_one(self.pool)
        .await?;

        Ok(ModifierGroup {
            id: row.id,
            name: row.name,
            selection_type: row.selection_type,
            required: row.required,
            min_select: row.min_select,
            max_select: row.max_select,
            options: Vec::new(),
        })
    }

    /// Delete a modifier group (cascades to its options).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the group doesn't exist.
    pub async fn delete_modifier_group(
        &self,
        group_id: ModifierGroupId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM modifier_group WHERE id = $1")
            .bind(group_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Insert an option into a modifier group.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create_modifier_option(
        &self,
        group_id: ModifierGroupId,
        name: &str,
        price_adjustment: Decimal,
        is_default: bool,
        display_order: i32,
    ) -> Result<ModifierOption, RepositoryError> {
        let row = sqlx::query_as::<_, OptionRow>(
            r"
            INSERT INTO modifier_option (group_id, name, price_adjustment, is_default, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, group_id, name, price_adjustment, is_default, display_order
            ",
        )
        .bind(group_id)
        .bind(name)
        .bind(price_adjustment)
        .bind(is_default)
        .bind(display_order)
        .fetch_one(self.pool)
        .await?;

        Ok(ModifierOption {
            id: row.id,
            name: row.name,
            price_adjustment: row.price_adjustment,
            is_default: row.is_default,
            display_order: row.display_order,
        })
    }

    /// Delete a modifier option.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the option doesn't exist.
    pub async fn delete_modifier_option(
        &self,
        option_id: ModifierOptionId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM modifier_option WHERE id = $1")
            .bind(option_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    // =========================================================================
    // Photos
    // =========================================================================

    /// Store a photo for an item; the first photo becomes the primary one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_photo(
        &self,
        item_id: ItemId,
        content: &[u8],
        mime_type: &str,
    ) -> Result<PhotoId, RepositoryError> {
        let photo_id = sqlx::query_scalar::<_, PhotoId>(
            r"
            INSERT INTO menu_item_photo (item_id, content, mime_type)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(item_id)
        .bind(content)
        .bind(mime_type)
        .fetch_one(self.pool)
        .await?;

        sqlx::query(
            r"
            UPDATE menu_item
            SET primary_photo_id = $2, updated_at = now()
            WHERE id = $1 AND primary_photo_id IS NULL
            ",
        )
        .bind(item_id)
        .bind(photo_id)
        .execute(self.pool)
        .await?;

        Ok(photo_id)
    }

    /// Fetch a photo by item and photo id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_photo(
        &self,
        item_id: ItemId,
        photo_id: PhotoId,
    ) -> Result<Option<PhotoRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, PhotoRecord>(
            r"
            SELECT id, item_id, content, mime_type
            FROM menu_item_photo
            WHERE id = $1 AND item_id = $2
            ",
        )
        .bind(photo_id)
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    async fn attach_groups(&self, rows: Vec<ItemRow>) -> Result<Vec<MenuItem>, RepositoryError> {
        let ids: Vec<ItemId> = rows.iter().map(|r| r.id).collect();
        let mut groups = self.load_modifier_groups(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let item_groups = groups.remove(&row.id).unwrap_or_default();
                row.into_item(item_groups)
            })
            .collect())
    }

    /// Load modifier groups (with options ordered by `display_order`) for a
    /// set of items, keyed by item id.
    async fn load_modifier_groups(
        &self,
        item_ids: &[ItemId],
    ) -> Result<HashMap<ItemId, Vec<ModifierGroup>>, RepositoryError> {
        if item_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let uuids: Vec<uuid::Uuid> = item_ids.iter().map(|id| id.as_uuid()).collect();

        let group_rows = sqlx::query_as::<_, GroupRow>(
            r"
            SELECT id, item_id, name, selection_type, required, min_select, max_select
            FROM modifier_group
            WHERE item_id = ANY($1)
            ORDER BY display_order ASC, name ASC
            ",
        )
        .bind(&uuids)
        .fetch_all(self.pool)
        .await?;

        let option_rows = sqlx::query_as::<_, OptionRow>(
            r"
            SELECT o.id, o.group_id, o.name, o.price_adjustment, o.is_default, o.display_order
            FROM modifier_option o
            JOIN modifier_group g ON g.id = o.group_id
            WHERE g.item_id = ANY($1)
            ORDER BY o.display_order ASC, o.name ASC
            ",
        )
        .bind(&uuids)
        .fetch_all(self.pool)
        .await?;

        let mut options_by_group: HashMap<ModifierGroupId, Vec<ModifierOption>> = HashMap::new();
        for row in option_rows {
            options_by_group
                .entry(row.group_id)
                .or_default()
                .push(ModifierOption {
                    id: row.id,
                    name: row.name,
                    price_adjustment: row.price_adjustment,
                    is_default: row.is_default,
                    display_order: row.display_order,
                });
        }

        let mut groups_by_item: HashMap<ItemId, Vec<ModifierGroup>> = HashMap::new();
        for row in group_rows {
            let options = options_by_group.remove(&row.id).unwrap_or_default();
            groups_by_item
                .entry(row.item_id)
                .or_default()
                .push(ModifierGroup {
                    id: row.id,
                    name: row.name,
                    selection_type: row.selection_type,
                    required: row.required,
                    min_select: row.min_select,
                    max_select: row.max_select,
                    options,
                });
        }

        Ok(groups_by_item)
    }
}
