//! Seed the database with a demo restaurant.
//!
//! Creates a restaurant with numbered tables (QR tokens provisioned),
//! a small category tree, and items with modifier groups - enough to
//! drive the ordering client end to end.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use rust_decimal::Decimal;
use tracing::info;

use table_tap_core::{CategoryStatus, MenuItemStatus, Price, RestaurantId, SelectionType};
use table_tap_server::db::{self, categories::CategoryRepository, items::ItemRepository, tables::TableRepository};

struct SeedItem {
    name: &'static str,
    price: &'static str,
    description: &'static str,
    chef_recommended: bool,
    popularity: i64,
}

const STARTERS: &[SeedItem] = &[
    SeedItem {
        name: "Crispy Spring Rolls",
        price: "6.50",
        description: "Vegetable rolls with sweet chili dip",
        chef_recommended: false,
        popularity: 48,
    },
    SeedItem {
        name: "Chicken Satay",
        price: "8.00",
        description: "Grilled skewers, peanut sauce",
        chef_recommended: true,
        popularity: 73,
    },
];

const MAINS: &[SeedItem] = &[
    SeedItem {
        name: "Pad Thai",
        price: "12.50",
        description: "Rice noodles, tamarind, crushed peanuts",
        chef_recommended: true,
        popularity: 91,
    },
    SeedItem {
        name: "Green Curry",
        price: "13.00",
        description: "Coconut milk, thai basil, bamboo shoots",
        chef_recommended: false,
        popularity: 64,
    },
    SeedItem {
        name: "Basil Fried Rice",
        price: "11.00",
        description: "Jasmine rice, holy basil, fried egg",
        chef_recommended: false,
        popularity: 52,
    },
];

/// Seed a demo restaurant.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run(name: &str, table_count: u32) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    // Restaurant (tenant) row; no repository - seeding is its only writer
    let restaurant_id = sqlx::query_scalar::<_, RestaurantId>(
        "INSERT INTO restaurant (name) VALUES ($1) RETURNING id",
    )
    .bind(name)
    .fetch_one(&pool)
    .await?;
    info!(%restaurant_id, name, "Restaurant created");

    // Tables with QR tokens
    let tables = TableRepository::new(&pool);
    for n in 1..=table_count {
        let row = tables
            .create(restaurant_id, &n.to_string(), Some("main floor"))
            .await?;
        tables
            .set_qr_token(row.id, restaurant_id, &random_token())
            .await?;
    }
    info!(count = table_count, "Tables created with QR tokens");

    // Categories and items
    let categories = CategoryRepository::new(&pool);
    let items = ItemRepository::new(&pool);

    for (idx, (category_name, seed_items)) in
        [("Starters", STARTERS), ("Mains", MAINS)].into_iter().enumerate()
    {
        let category = categories
            .create(
                restaurant_id,
                category_name,
                None,
                i32::try_from(idx).unwrap_or(0),
                CategoryStatus::Active,
            )
            .await?;

        for seed in seed_items {
            let price = Price::new(seed.price.parse::<Decimal>()?)?;
            let item = items
                .create(
                    restaurant_id,
                    category.id,
                    seed.name,
                    Some(seed.description),
                    price,
                    MenuItemStatus::Available,
                    seed.chef_recommended,
                    Some(15),
                )
                .await?;

            sqlx::query("UPDATE menu_item SET popularity_score = $2 WHERE id = $1")
                .bind(item.id)
                .bind(seed.popularity)
                .execute(&pool)
                .await?;

            // One spice-level group per main
            if category_name == "Mains" {
                let group = items
                    .create_modifier_group(
                        item.id,
                        "Spice Level",
                        SelectionType::Single,
                        true,
                        1,
                        1,
                    )
                    .await?;

                for (order, (option_name, adjustment)) in
                    [("Mild", "0"), ("Medium", "0"), ("Thai Hot", "0.50")]
                        .into_iter()
                        .enumerate()
                {
                    items
                        .create_modifier_option(
                            group.id,
                            option_name,
                            adjustment.parse::<Decimal>()?,
                            order == 0,
                            i32::try_from(order).unwrap_or(0),
                        )
                        .await?;
                }
            }
        }

        info!(category = category_name, items = seed_items.len(), "Category seeded");
    }

    info!("Seeding complete!");
    Ok(())
}

fn random_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
