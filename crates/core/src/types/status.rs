//! Status enums for menu and table entities.

use serde::{Deserialize, Serialize};

/// Availability status of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "menu_item_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemStatus {
    #[default]
    Available,
    Unavailable,
    SoldOut,
}

impl MenuItemStatus {
    /// Whether an item in this status can currently be ordered.
    #[must_use]
    pub const fn can_order(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Lifecycle status of a menu category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "category_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

/// Lifecycle status of a dining table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "table_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Active,
    Inactive,
}

/// How many options may be picked from a modifier group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "selection_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    /// Exactly one option (radio-button semantics).
    Single,
    /// Zero or more options, bounded by the group's min/max counts.
    Multiple,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_wire_format() {
        assert_eq!(
            serde_json::to_string(&MenuItemStatus::SoldOut).ok(),
            Some("\"sold_out\"".to_owned())
        );
        assert_eq!(
            serde_json::to_string(&SelectionType::Single).ok(),
            Some("\"single\"".to_owned())
        );
    }

    #[test]
    fn test_can_order() {
        assert!(MenuItemStatus::Available.can_order());
        assert!(!MenuItemStatus::SoldOut.can_order());
        assert!(!MenuItemStatus::Unavailable.can_order());
    }
}
