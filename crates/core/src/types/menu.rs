//! Wire DTOs for the menu surface.
//!
//! These types are shared verbatim between the server routes and the
//! client wrappers, so the JSON contract lives in exactly one place.
//! Field names follow the public API's camelCase convention.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ItemId, ModifierGroupId, ModifierOptionId, PhotoId, RestaurantId};
use crate::types::price::Price;
use crate::types::status::{CategoryStatus, MenuItemStatus, SelectionType};
use crate::types::table::TableContext;

/// A menu category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: CategoryId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub display_order: i32,
    pub status: CategoryStatus,
}

/// One selectable option inside a modifier group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModifierOption {
    pub id: ModifierOptionId,
    pub name: String,
    /// Added to the item's base price when selected; may be negative.
    pub price_adjustment: Decimal,
    #[serde(default)]
    pub is_default: bool,
    pub display_order: i32,
}

/// A group of modifier options attached to a menu item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModifierGroup {
    pub id: ModifierGroupId,
    pub name: String,
    pub selection_type: SelectionType,
    #[serde(default)]
    pub required: bool,
    pub min_select: i32,
    pub max_select: i32,
    /// Ordered by each option's `display_order`.
    #[serde(default)]
    pub options: Vec<ModifierOption>,
}

/// A menu item as served to the ordering client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: ItemId,
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub status: MenuItemStatus,
    #[serde(default)]
    pub is_chef_recommended: bool,
    #[serde(default)]
    pub popularity_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_photo_id: Option<PhotoId>,
    #[serde(default)]
    pub modifier_groups: Vec<ModifierGroup>,
}

impl MenuItem {
    /// Whether the item can currently be added to a cart.
    #[must_use]
    pub const fn can_order(&self) -> bool {
        self.status.can_order()
    }
}

/// Pagination metadata on menu listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Single-page pagination covering `total` items.
    #[must_use]
    pub const fn single_page(total: u64) -> Self {
        Self {
            page: 1,
            page_size: if total > u32::MAX as u64 {
                u32::MAX
            } else {
                total as u32
            },
            total_items: total,
            total_pages: 1,
        }
    }
}

/// The menu body of a [`MenuResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItem>,
    pub pagination: Pagination,
}

/// Response envelope for `GET /api/menu?table&token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub table: TableContext,
    pub menu: MenuPayload,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_camel_case_wire() {
        let item = MenuItem {
            id: ItemId::generate(),
            category_id: CategoryId::generate(),
            name: "Pad Thai".to_owned(),
            description: None,
            price: Price::new("11.50".parse().unwrap()).unwrap(),
            status: MenuItemStatus::Available,
            is_chef_recommended: true,
            popularity_score: 42,
            prep_time_minutes: Some(15),
            primary_photo_id: None,
            modifier_groups: Vec::new(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isChefRecommended"], true);
        assert_eq!(json["popularityScore"], 42);
        assert_eq!(json["prepTimeMinutes"], 15);
        // absent optionals are omitted, not null
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_modifier_groups_default_empty_on_deserialize() {
        let json = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "categoryId": uuid::Uuid::new_v4(),
            "name": "Green Curry",
            "price": "13.00",
            "status": "available",
        });

        let item: MenuItem = serde_json::from_value(json).unwrap();
        assert!(item.modifier_groups.is_empty());
        assert!(!item.is_chef_recommended);
    }

    #[test]
    fn test_single_page_pagination() {
        let p = Pagination::single_page(7);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.total_items, 7);
    }
}
