//! Cart store.
//!
//! Maintains the ordered list of cart lines and keeps the computed totals
//! consistent: the cart total is always the sum of line totals, never
//! tracked independently.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use table_tap_core::{MenuItem, ModifierOptionId};

use crate::storage::{SessionStorage, keys};

/// Errors from cart operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be a positive integer on add.
    #[error("quantity must be positive")]
    ZeroQuantity,
}

/// A selected modifier option, with its price delta captured at selection
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineModifier {
    pub option_id: ModifierOptionId,
    pub name: String,
    pub price_adjustment: Decimal,
}

/// One configured purchase of a menu item at a given quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Derived identity: item id + sorted option ids + creation instant.
    /// Two additions of the same configuration stay distinct lines.
    pub id: String,
    /// Snapshot of the item at add time; later menu edits don't reprice
    /// existing lines.
    pub menu_item: MenuItem,
    pub quantity: u32,
    pub modifiers: Vec<CartLineModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// `(item price + sum of modifier deltas) * quantity`, recomputed on
    /// every quantity change.
    pub total_price: Decimal,
}

impl CartLine {
    fn compute_total(&self) -> Decimal {
        let adjustments: Decimal = self.modifiers.iter().map(|m| m.price_adjustment).sum();
        self.menu_item.price.line_total(adjustments, self.quantity)
    }
}

/// Cart store.
pub struct CartStore {
    storage: Arc<dyn SessionStorage>,
    lines: Vec<CartLine>,
    /// Disambiguates lines created within the same clock instant.
    line_seq: u64,
}

impl CartStore {
    /// Construct the store, hydrating once from persisted state.
    ///
    /// A corrupt or unparseable persisted cart is treated as empty, not an
    /// error.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let lines = storage
            .get(keys::CART)
            .and_then(|raw| serde_json::from_str::<Vec<CartLine>>(&raw).ok())
            .unwrap_or_default();

        Self {
            storage,
            lines,
            line_seq: 0,
        }
    }

    /// Append a new line for `quantity` of `menu_item` with the selected
    /// modifiers.
    ///
    /// Never merges with an existing line, even for an identical
    /// configuration: the creation instant is part of the line identity,
    /// since special instructions can differ between otherwise equal
    /// lines.
    ///
    /// Returns the freshly generated line id.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] if `quantity` is zero.
    pub fn add_item(
        &mut self,
        menu_item: &MenuItem,
        quantity: u32,
        modifiers: Vec<CartLineModifier>,
        special_instructions: Option<String>,
    ) -> Result<String, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        self.line_seq += 1;
        let id = derive_line_id(menu_item, &modifiers, self.line_seq);
        let mut line = CartLine {
            id: id.clone(),
            menu_item: menu_item.clone(),
            quantity,
            modifiers,
            special_instructions,
            total_price: Decimal::ZERO,
        };
        line.total_price = line.compute_total();

        self.lines.push(line);
        self.persist();

        Ok(id)
    }

    /// Set a line's quantity, recomputing its total from the original item
    /// snapshot and modifiers.
    ///
    /// A quantity of zero removes the line - the only removal path
    /// reachable through quantity edits. An unknown `line_id` is a silent
    /// no-op, since UI state may lag store state.
    pub fn update_item_quantity(&mut self, line_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(line_id);
            return;
        }

        let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) else {
            return;
        };

        line.quantity = quantity;
        line.total_price = line.compute_total();
        self.persist();
    }

    /// Remove a line unconditionally; no-op if absent.
    pub fn remove_item(&mut self, line_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != line_id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Empty the cart and erase the persisted key.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.storage.remove(keys::CART);
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of quantities across all lines (not the line count).
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(|l| l.total_price).sum()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.lines) {
            Ok(raw) => self.storage.set(keys::CART, &raw),
            Err(e) => tracing::warn!("failed to serialize cart: {e}"),
        }
    }
}

/// Derive a fresh line identity from the configuration, the creation
/// instant, and a per-store sequence that keeps two adds within the same
/// instant distinct.
fn derive_line_id(menu_item: &MenuItem, modifiers: &[CartLineModifier], seq: u64) -> String {
    let mut option_ids: Vec<String> = modifiers.iter().map(|m| m.option_id.to_string()).collect();
    option_ids.sort_unstable();

    format!(
        "{}-{}-{}-{seq}",
        menu_item.id,
        option_ids.join("-"),
        Utc::now().timestamp_micros()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use table_tap_core::{CategoryId, ItemId, MenuItemStatus, Price};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(price: &str) -> MenuItem {
        MenuItem {
            id: ItemId::generate(),
            category_id: CategoryId::generate(),
            name: "Spring Rolls".to_owned(),
            description: None,
            price: Price::new(dec(price)).unwrap(),
            status: MenuItemStatus::Available,
            is_chef_recommended: false,
            popularity_score: 0,
            prep_time_minutes: None,
            primary_photo_id: None,
            modifier_groups: Vec::new(),
        }
    }

    fn modifier(adjustment: &str) -> CartLineModifier {
        CartLineModifier {
            option_id: ModifierOptionId::generate(),
            name: "Extra sauce".to_owned(),
            price_adjustment: dec(adjustment),
        }
    }

    fn store() -> (Arc<MemoryStorage>, CartStore) {
        let storage = Arc::new(MemoryStorage::new());
        let cart = CartStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
        (storage, cart)
    }

    #[test]
    fn test_add_item_computes_line_total() {
        let (_, mut cart) = store();

        cart.add_item(&item("12.50"), 3, vec![modifier("1.25")], None)
            .unwrap();

        // (12.50 + 1.25) * 3
        assert_eq!(cart.total_price(), dec("41.25"));
    }

    #[test]
    fn test_add_item_accumulates_totals() {
        let (_, mut cart) = store();

        cart.add_item(&item("4.00"), 2, Vec::new(), None).unwrap();
        let before = cart.total_price();
        cart.add_item(&item("10.00"), 1, vec![modifier("0.50")], None)
            .unwrap();

        assert_eq!(cart.total_price(), before + dec("10.50"));
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let (_, mut cart) = store();
        assert_eq!(
            cart.add_item(&item("4.00"), 0, Vec::new(), None),
            Err(CartError::ZeroQuantity)
        );
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_identical_configurations_stay_distinct_lines() {
        let (_, mut cart) = store();
        let burger = item("9.00");

        cart.add_item(&burger, 1, Vec::new(), None).unwrap();
        cart.add_item(&burger, 1, Vec::new(), None).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_items(), 2);
        assert_ne!(cart.items()[0].id, cart.items()[1].id);
    }

    #[test]
    fn test_total_items_sums_quantities() {
        let (_, mut cart) = store();
        cart.add_item(&item("4.00"), 3, Vec::new(), None).unwrap();
        cart.add_item(&item("5.00"), 2, Vec::new(), None).unwrap();

        // 5 units across 2 lines
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_update_quantity_recomputes_total() {
        let (_, mut cart) = store();
        let id = cart
            .add_item(&item("6.00"), 1, vec![modifier("1.00")], None)
            .unwrap();

        cart.update_item_quantity(&id, 4);
        assert_eq!(cart.total_price(), dec("28.00"));
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let (_, mut cart) = store();
        let keep = cart.add_item(&item("3.00"), 1, Vec::new(), None).unwrap();
        let drop = cart.add_item(&item("5.00"), 2, Vec::new(), None).unwrap();

        cart.update_item_quantity(&drop, 0);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id, keep);
        assert_eq!(cart.total_price(), dec("3.00"));
    }

    #[test]
    fn test_update_unknown_line_is_silent_noop() {
        let (_, mut cart) = store();
        cart.add_item(&item("3.00"), 1, Vec::new(), None).unwrap();

        cart.update_item_quantity("stale-line-id", 7);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_item() {
        let (_, mut cart) = store();
        let id = cart.add_item(&item("3.00"), 1, Vec::new(), None).unwrap();

        cart.remove_item(&id);
        assert!(cart.items().is_empty());

        // removing again is a no-op
        cart.remove_item(&id);
    }

    #[test]
    fn test_clear_cart_erases_persisted_key() {
        let (storage, mut cart) = store();
        cart.add_item(&item("3.00"), 1, Vec::new(), None).unwrap();
        assert!(storage.get(keys::CART).is_some());

        cart.clear_cart();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(storage.get(keys::CART), None);
    }

    #[test]
    fn test_hydration_roundtrip() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut cart = CartStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
            cart.add_item(&item("7.50"), 2, Vec::new(), Some("no peanuts".to_owned()))
                .unwrap();
        }

        let rehydrated = CartStore::new(storage);
        assert_eq!(rehydrated.total_items(), 2);
        assert_eq!(rehydrated.total_price(), dec("15.00"));
        assert_eq!(
            rehydrated.items()[0].special_instructions.as_deref(),
            Some("no peanuts")
        );
    }

    #[test]
    fn test_corrupt_persisted_cart_is_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::CART, "{definitely not json");

        let cart = CartStore::new(storage);
        assert_eq!(cart.total_items(), 0);
        assert!(cart.items().is_empty());
    }
}
