//! Cross-store behavior of the ordering client.
//!
//! These tests exercise the session/cart/menu stores together the way the
//! ordering pages do, without a server: store state is the unit under
//! test, the API layer is out of the picture.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use table_tap_client::storage::{MemoryStorage, SessionStorage, keys};
use table_tap_client::stores::{CartStore, MenuSnapshot, MenuStore, SessionStore};
use table_tap_core::{
    AuthResponse, CategoryId, Customer, CustomerId, Email, ItemId, MenuItem, MenuItemStatus,
    MenuPayload, Pagination, Price, RestaurantId, TableContext, TableId,
};

fn dec(s: &str) -> Decimal {
    s.parse().expect("valid decimal")
}

fn menu_item(name: &str, price: &str, popularity: i64) -> MenuItem {
    MenuItem {
        id: ItemId::generate(),
        category_id: CategoryId::generate(),
        name: name.to_owned(),
        description: None,
        price: Price::new(dec(price)).expect("positive price"),
        status: MenuItemStatus::Available,
        is_chef_recommended: false,
        popularity_score: popularity,
        prep_time_minutes: None,
        primary_photo_id: None,
        modifier_groups: Vec::new(),
    }
}

fn table_context() -> TableContext {
    TableContext {
        table_id: TableId::generate(),
        restaurant_id: RestaurantId::generate(),
        table_number: "5".to_owned(),
    }
}

fn snapshot(items: Vec<MenuItem>) -> MenuSnapshot {
    let total = items.len() as u64;
    MenuSnapshot {
        menu: MenuPayload {
            categories: Vec::new(),
            items,
            pagination: Pagination::single_page(total),
        },
        table: table_context(),
        photo_urls: HashMap::new(),
    }
}

fn auth_response() -> AuthResponse {
    AuthResponse {
        access_token: "issued-token".to_owned(),
        user: Customer {
            id: CustomerId::generate(),
            email: Email::parse("diner@example.com").expect("valid email"),
            first_name: Some("Dana".to_owned()),
            last_name: None,
            date_of_birth: None,
            phone_number: None,
            has_profile_picture: false,
        },
    }
}

#[test]
fn logout_boundary_clears_cart_but_not_table_context() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());
    let mut session = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
    let mut cart = CartStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

    session.set_qr_token("entry-token");
    session.set_table_context(table_context());
    session.login(auth_response());

    cart.add_item(&menu_item("Pad Thai", "12.50", 9), 2, Vec::new(), None)
        .expect("add succeeds");
    assert_eq!(cart.total_items(), 2);

    // Crossing the auth boundary: page flow logs out and clears the cart
    session.logout();
    cart.clear_cart();

    assert!(!session.is_authenticated());
    assert_eq!(cart.total_items(), 0);
    assert_eq!(storage.get(keys::CART), None);
    // Table entry context survives; the diner is still seated
    assert_eq!(session.qr_token(), Some("entry-token"));
    assert!(session.table_context().is_some());
}

#[test]
fn fresh_session_rehydrates_all_stores_from_storage() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());

    {
        let mut session = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
        let mut cart = CartStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
        session.login(auth_response());
        cart.add_item(&menu_item("Green Curry", "13.00", 5), 1, Vec::new(), None)
            .expect("add succeeds");
    }

    // Same browser session, fresh page: stores hydrate once from storage
    let session = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
    let cart = CartStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

    assert!(session.is_authenticated());
    assert!(!session.is_guest());
    assert_eq!(cart.total_items(), 1);
    assert_eq!(cart.total_price(), dec("13.00"));
}

#[test]
fn menu_page_contract_check_then_fetch_then_set() {
    let mut menu = MenuStore::new();

    // First visit: cache miss, page fetches
    assert!(!menu.is_cache_valid());
    let ticket = menu.begin_fetch();
    assert!(menu.set_menu_cache(ticket, snapshot(vec![
        menu_item("Pad Thai", "12.50", 91),
        menu_item("Satay", "8.00", 73),
    ])));

    // Second visit inside the window: cache hit, no fetch needed
    assert!(menu.is_cache_valid());
    assert_eq!(menu.all_items().len(), 2);
    assert_eq!(menu.best_sellers()[0].name, "Pad Thai");
}

#[test]
fn table_switch_clears_menu_before_new_fetch() {
    let mut menu = MenuStore::new();

    let ticket = menu.begin_fetch();
    menu.set_menu_cache(ticket, snapshot(vec![menu_item("Old Table Dish", "5.00", 1)]));

    // QR scan for a different table: caller clears before refetching
    menu.clear_menu_cache();
    assert!(!menu.is_cache_valid());
    assert!(menu.all_items().is_empty());

    let ticket = menu.begin_fetch();
    menu.set_menu_cache(ticket, snapshot(vec![menu_item("New Table Dish", "6.00", 1)]));
    assert_eq!(menu.all_items()[0].name, "New Table Dish");
}

#[test]
fn guest_can_order_but_has_no_identity() {
    let storage: Arc<MemoryStorage> = Arc::new(MemoryStorage::new());
    let mut session = SessionStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);
    let mut cart = CartStore::new(Arc::clone(&storage) as Arc<dyn SessionStorage>);

    session.login_as_guest();

    // Past the login gate, cart works
    assert!(session.is_authenticated());
    cart.add_item(&menu_item("Spring Rolls", "6.50", 48), 1, Vec::new(), None)
        .expect("add succeeds");
    assert_eq!(cart.total_items(), 1);

    // ...but no backend identity is available
    assert!(session.is_guest());
    assert_eq!(session.auth_token(), None);
    assert_eq!(session.customer(), None);
}
