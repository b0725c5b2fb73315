//! Demo data for local development.
//!
//! Inserts are idempotent: rows whose name or SKU already exists are skipped,
//! so seeding an existing database is harmless.

use rust_decimal::Decimal;
use sqlx::PgPool;

/// Categories created by [`seed_demo_data`].
pub const DEMO_CATEGORIES: &[&str] = &["Electronics", "Clothing", "Books"];

/// `(sku, name, price in cents, quantity, category name)`.
pub const DEMO_PRODUCTS: &[(&str, &str, i64, i32, &str)] = &[
    ("ELEC001", "Laptop", 99_999, 10, "Electronics"),
    ("ELEC002", "Monitor", 19_999, 15, "Electronics"),
    ("CLOT001", "T-Shirt", 1_999, 50, "Clothing"),
    ("CLOT002", "Jeans", 4_999, 30, "Clothing"),
    ("BOOK001", "Rust Programming", 2_999, 20, "Books"),
];

/// Insert the demo categories and products. Returns the number of new rows.
pub async fn seed_demo_data(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for name in DEMO_CATEGORIES {
        inserted += sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT DO NOTHING")
            .bind(*name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    for (sku, name, cents, quantity, category) in DEMO_PRODUCTS {
        inserted += sqlx::query(
            "INSERT INTO products (sku, name, price, quantity, category_id, updated_at)
             SELECT $1, $2, $3, $4, c.id, NOW() FROM categories c WHERE c.name = $5
             ON CONFLICT DO NOTHING",
        )
        .bind(*sku)
        .bind(*name)
        .bind(Decimal::new(*cents, 2))
        .bind(*quantity)
        .bind(*category)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    tracing::info!(inserted, "Demo data seeded");
    Ok(inserted)
}
