//! Session-scoped key/value persistence.
//!
//! Models the browser's per-tab session storage: string keys, string
//! values, gone when the session ends. Each store owns its keys
//! exclusively; nothing here coordinates cross-store access.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage keys, one per store concern.
pub mod keys {
    /// QR token presented at menu entry.
    pub const QR_TOKEN: &str = "table_tap_qr_token";

    /// Bearer token from the last credential exchange.
    pub const AUTH_TOKEN: &str = "table_tap_auth";

    /// Serialized customer record.
    pub const CUSTOMER: &str = "table_tap_customer";

    /// Guest-mode flag.
    pub const GUEST: &str = "table_tap_guest";

    /// Serialized table context `{tableId, restaurantId, tableNumber}`.
    pub const TABLE: &str = "table_tap_table";

    /// Serialized cart line list.
    pub const CART: &str = "table_tap_cart";
}

/// A browsing-session-scoped string store.
///
/// Implementations must apply writes synchronously: a `get` issued after
/// `set` returns observes the written value.
pub trait SessionStorage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Remove a value; removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStorage`] with process lifetime.
///
/// The default backing for native builds and tests; a browser build would
/// swap in a `sessionStorage`-backed implementation.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .map(|values| values.get(key).cloned())
            .unwrap_or(None)
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);

        storage.set("k", "v");
        assert_eq!(storage.get("k"), Some("v".to_owned()));

        storage.set("k", "v2");
        assert_eq!(storage.get("k"), Some("v2".to_owned()));

        storage.remove("k");
        assert_eq!(storage.get("k"), None);

        // removing again is a no-op
        storage.remove("k");
    }
}
