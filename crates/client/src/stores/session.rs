//! Session/auth store.
//!
//! Single source of truth for "who is browsing". Exactly one of three
//! modes holds at a time; transitions are explicit and clear the other
//! modes' persisted keys.

use std::sync::Arc;

use table_tap_core::{AuthResponse, Customer, TableContext};

use crate::storage::{SessionStorage, keys};

/// The three mutually exclusive browsing modes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// No decision yet; no continuity guarantee beyond the session.
    #[default]
    Anonymous,
    /// Explicit opt-in to order without a backend identity.
    Guest,
    /// Backend-verified identity with a bearer token.
    Authenticated {
        token: String,
        customer: Customer,
    },
}

/// Session/auth store.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    mode: SessionMode,
    qr_token: Option<String>,
    table: Option<TableContext>,
}

impl SessionStore {
    /// Construct the store, hydrating once from persisted state.
    ///
    /// A token without a readable customer record (or vice versa) does not
    /// count as authenticated; corrupt JSON is treated as absent.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let token = storage.get(keys::AUTH_TOKEN);
        let customer = storage
            .get(keys::CUSTOMER)
            .and_then(|raw| serde_json::from_str::<Customer>(&raw).ok());

        let mode = match (token, customer) {
            (Some(token), Some(customer)) => SessionMode::Authenticated { token, customer },
            _ if storage.get(keys::GUEST).as_deref() == Some("true") => SessionMode::Guest,
            _ => SessionMode::Anonymous,
        };

        let qr_token = storage.get(keys::QR_TOKEN);
        let table = storage
            .get(keys::TABLE)
            .and_then(|raw| serde_json::from_str::<TableContext>(&raw).ok());

        Self {
            storage,
            mode,
            qr_token,
            table,
        }
    }

    // =========================================================================
    // Mode Transitions
    // =========================================================================

    /// Enter Authenticated mode from a credential-exchange result.
    ///
    /// Clears the guest flag; the token's contents are not inspected
    /// beyond presence.
    pub fn login(&mut self, response: AuthResponse) {
        self.storage.set(keys::AUTH_TOKEN, &response.access_token);
        if let Ok(raw) = serde_json::to_string(&response.user) {
            self.storage.set(keys::CUSTOMER, &raw);
        }
        self.storage.remove(keys::GUEST);

        self.mode = SessionMode::Authenticated {
            token: response.access_token,
            customer: response.user,
        };
    }

    /// Enter Guest mode, clearing any authenticated identity.
    pub fn login_as_guest(&mut self) {
        self.storage.set(keys::GUEST, "true");
        self.storage.remove(keys::AUTH_TOKEN);
        self.storage.remove(keys::CUSTOMER);

        self.mode = SessionMode::Guest;
    }

    /// Reset to Anonymous, clearing all three persisted keys.
    ///
    /// Idempotent: logging out while already Anonymous is a no-op.
    pub fn logout(&mut self) {
        self.storage.remove(keys::AUTH_TOKEN);
        self.storage.remove(keys::CUSTOMER);
        self.storage.remove(keys::GUEST);

        self.mode = SessionMode::Anonymous;
    }

    /// Replace the cached customer snapshot without changing mode.
    ///
    /// Silent no-op unless currently Authenticated.
    pub fn update_customer(&mut self, customer: Customer) {
        let SessionMode::Authenticated { token, .. } = &self.mode else {
            return;
        };
        let token = token.clone();

        if let Ok(raw) = serde_json::to_string(&customer) {
            self.storage.set(keys::CUSTOMER, &raw);
        }
        self.mode = SessionMode::Authenticated { token, customer };
    }

    // =========================================================================
    // Readers
    // =========================================================================

    /// Current browsing mode.
    #[must_use]
    pub const fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Allowed past the login gate: Authenticated or Guest.
    ///
    /// The two differ only in whether backend-identified actions (order
    /// history, loyalty) are available.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(
            self.mode,
            SessionMode::Authenticated { .. } | SessionMode::Guest
        )
    }

    /// Whether the session is in Guest mode.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self.mode, SessionMode::Guest)
    }

    /// The bearer token, when Authenticated.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        match &self.mode {
            SessionMode::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    /// The cached customer record, when Authenticated.
    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        match &self.mode {
            SessionMode::Authenticated { customer, .. } => Some(customer),
            _ => None,
        }
    }

    // =========================================================================
    // Table Entry Context
    // =========================================================================

    /// Persist the QR token presented at entry.
    pub fn set_qr_token(&mut self, token: &str) {
        self.storage.set(keys::QR_TOKEN, token);
        self.qr_token = Some(token.to_owned());
    }

    /// The QR token for the current session, if any.
    #[must_use]
    pub fn qr_token(&self) -> Option<&str> {
        self.qr_token.as_deref()
    }

    /// Persist the table context a QR scan resolved to.
    ///
    /// Callers switching tables must clear the menu cache themselves; a
    /// different table must never serve a stale table's menu.
    pub fn set_table_context(&mut self, table: TableContext) {
        if let Ok(raw) = serde_json::to_string(&table) {
            self.storage.set(keys::TABLE, &raw);
        }
        self.table = Some(table);
    }

    /// The table context for the current session, if any.
    #[must_use]
    pub const fn table_context(&self) -> Option<&TableContext> {
        self.table.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use table_tap_core::{CustomerId, Email};

    fn customer(email: &str) -> Customer {
        Customer {
            id: CustomerId::generate(),
            email: Email::parse(email).unwrap(),
            first_name: None,
            last_name: None,
            date_of_birth: None,
            phone_number: None,
            has_profile_picture: false,
        }
    }

    fn auth_response(email: &str) -> AuthResponse {
        AuthResponse {
            access_token: "t".to_owned(),
            user: customer(email),
        }
    }

    #[test]
    fn test_initial_mode_is_anonymous() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(*store.mode(), SessionMode::Anonymous);
        assert!(!store.is_authenticated());
        assert!(!store.is_guest());
    }

    #[test]
    fn test_login_then_logout() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

        store.login(auth_response("diner@example.com"));
        assert!(store.is_authenticated());
        assert!(!store.is_guest());
        assert_eq!(store.auth_token(), Some("t"));
        assert!(storage.get(keys::AUTH_TOKEN).is_some());

        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(storage.get(keys::AUTH_TOKEN), None);
        assert_eq!(storage.get(keys::CUSTOMER), None);
        assert_eq!(storage.get(keys::GUEST), None);

        // logout is idempotent
        store.logout();
        assert_eq!(*store.mode(), SessionMode::Anonymous);
    }

    #[test]
    fn test_guest_mode_clears_identity() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

        store.login(auth_response("diner@example.com"));
        store.login_as_guest();

        assert!(store.is_authenticated());
        assert!(store.is_guest());
        assert_eq!(store.auth_token(), None);
        assert_eq!(store.customer(), None);
        assert_eq!(storage.get(keys::AUTH_TOKEN), None);
        assert_eq!(storage.get(keys::GUEST), Some("true".to_owned()));
    }

    #[test]
    fn test_login_clears_guest_flag() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

        store.login_as_guest();
        store.login(auth_response("diner@example.com"));

        assert!(!store.is_guest());
        assert_eq!(storage.get(keys::GUEST), None);
    }

    #[test]
    fn test_update_customer_requires_authenticated() {
        let mut store = SessionStore::new(Arc::new(MemoryStorage::new()));

        // no-op while anonymous
        store.update_customer(customer("other@example.com"));
        assert_eq!(store.customer(), None);

        store.login(auth_response("diner@example.com"));
        let updated = customer("renamed@example.com");
        store.update_customer(updated.clone());
        assert_eq!(store.customer(), Some(&updated));
        // mode untouched
        assert_eq!(store.auth_token(), Some("t"));
    }

    #[test]
    fn test_hydration_from_persisted_state() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
            store.login(auth_response("diner@example.com"));
        }

        let rehydrated = SessionStore::new(storage);
        assert!(rehydrated.is_authenticated());
        assert_eq!(rehydrated.auth_token(), Some("t"));
    }

    #[test]
    fn test_corrupt_customer_json_is_not_authenticated() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::AUTH_TOKEN, "t");
        storage.set(keys::CUSTOMER, "{not json");

        let store = SessionStore::new(storage);
        assert_eq!(*store.mode(), SessionMode::Anonymous);
    }

    #[test]
    fn test_table_context_roundtrip() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

        let ctx = TableContext {
            table_id: table_tap_core::TableId::generate(),
            restaurant_id: table_tap_core::RestaurantId::generate(),
            table_number: "7".to_owned(),
        };
        store.set_qr_token("qr-token");
        store.set_table_context(ctx.clone());

        let rehydrated = SessionStore::new(storage);
        assert_eq!(rehydrated.qr_token(), Some("qr-token"));
        assert_eq!(rehydrated.table_context(), Some(&ctx));
    }
}
