//! End-to-end ordering flow against a running server.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p table-tap-server)
//! - A seeded restaurant (cargo run -p table-tap-cli -- seed) with
//!   `TABLETAP_TEST_RESTAURANT_ID` pointing at it
//!
//! Run with: cargo test -p table-tap-integration-tests -- --ignored

use rust_decimal::Decimal;
use uuid::Uuid;

use table_tap_client::ApiClient;
use table_tap_client::api::admin::{CategoryPayload, ItemPayload, TablePayload};
use table_tap_client::api::auth::SignupRequest;
use table_tap_core::{MenuItemStatus, ProfilePatch, RestaurantId};

use table_tap_integration_tests::base_url;

fn restaurant_id() -> RestaurantId {
    std::env::var("TABLETAP_TEST_RESTAURANT_ID")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .expect("TABLETAP_TEST_RESTAURANT_ID must be a restaurant UUID")
}

fn client() -> ApiClient {
    ApiClient::new(&base_url()).expect("valid base url")
}

/// Unique suffix so reruns don't trip uniqueness constraints.
fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn qr_entry_serves_menu_for_valid_token() {
    let admin = client().admin(restaurant_id());

    // Provision a fresh table + QR token
    let table = admin
        .create_table(&TablePayload {
            table_number: Some(unique("t")),
            location: Some("patio".to_owned()),
        })
        .await
        .expect("table created");
    let qr = admin.generate_qr(table.id).await.expect("qr generated");

    // Enter via the QR pair
    let menu = client()
        .fetch_menu(table.id, &qr.token)
        .await
        .expect("menu served");

    assert!(menu.success);
    assert_eq!(menu.table.table_id, table.id);
    assert_eq!(menu.menu.items.len() as u64, menu.menu.pagination.total_items);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn qr_regeneration_invalidates_old_token() {
    let admin = client().admin(restaurant_id());

    let table = admin
        .create_table(&TablePayload {
            table_number: Some(unique("t")),
            location: None,
        })
        .await
        .expect("table created");

    let old_qr = admin.generate_qr(table.id).await.expect("first token");
    let new_qr = admin.generate_qr(table.id).await.expect("second token");
    assert_ne!(old_qr.token, new_qr.token);

    // Old token no longer resolves
    let err = client()
        .fetch_menu(table.id, &old_qr.token)
        .await
        .expect_err("stale token rejected");
    assert!(matches!(
        err,
        table_tap_client::ApiError::Status { status: 401, .. }
    ));

    // New token does
    assert!(
        client()
            .fetch_menu(table.id, &new_qr.token)
            .await
            .expect("fresh token accepted")
            .success
    );
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn duplicate_category_name_conflicts() {
    let admin = client().admin(restaurant_id());
    let name = unique("Desserts");

    let payload = CategoryPayload {
        name: name.clone(),
        description: None,
        display_order: None,
        status: None,
    };

    admin.create_category(&payload).await.expect("first create");
    let err = admin
        .create_category(&payload)
        .await
        .expect_err("duplicate rejected");

    assert!(matches!(
        err,
        table_tap_client::ApiError::Status { status: 409, .. }
    ));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn item_crud_and_status_change() {
    let admin = client().admin(restaurant_id());

    let category = admin
        .create_category(&CategoryPayload {
            name: unique("Specials"),
            description: None,
            display_order: Some(99),
            status: None,
        })
        .await
        .expect("category created");

    let item = admin
        .create_item(&ItemPayload {
            name: unique("Mango Sticky Rice"),
            category_id: category.id,
            price: "7.50".parse::<Decimal>().expect("decimal"),
            status: MenuItemStatus::Available,
            description: Some("Seasonal".to_owned()),
            prep_time_minutes: Some(10),
            is_chef_recommended: Some(true),
        })
        .await
        .expect("item created");

    assert!(item.can_order());

    let fetched = admin.get_item(item.id).await.expect("item fetched");
    assert_eq!(fetched.name, item.name);
    assert!(fetched.is_chef_recommended);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn signup_login_and_profile_patch() {
    let api = client();
    let email = format!("{}@example.com", unique("diner"));

    let signed_up = api
        .signup(&SignupRequest {
            email: email.clone(),
            password: "correct horse battery".to_owned(),
            first_name: Some("Dana".to_owned()),
            last_name: None,
        })
        .await
        .expect("signup succeeds");
    assert!(!signed_up.access_token.is_empty());

    let logged_in = api
        .login(&email, "correct horse battery")
        .await
        .expect("login succeeds");

    // Patch one field; the others stay put
    let updated = api
        .update_profile(
            &logged_in.access_token,
            &ProfilePatch {
                last_name: Some("Lee".to_owned()),
                ..ProfilePatch::default()
            },
        )
        .await
        .expect("patch applied");

    assert_eq!(updated.first_name.as_deref(), Some("Dana"));
    assert_eq!(updated.last_name.as_deref(), Some("Lee"));

    // Wrong password is a 401
    let err = api
        .login(&email, "wrong password!")
        .await
        .expect_err("bad credentials rejected");
    assert!(matches!(
        err,
        table_tap_client::ApiError::Status { status: 401, .. }
    ));
}
