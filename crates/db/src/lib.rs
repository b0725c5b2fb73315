//! PostgreSQL persistence for categories and products.
//!
//! - [`models`] -- row structs and request DTOs.
//! - [`repositories`] -- zero-sized repos taking `&PgPool`.
//! - [`lookup`] -- the store reads behind the validation service.
//! - [`seed`] -- optional demo data.

use sqlx::postgres::PgPoolOptions;

pub mod lookup;
pub mod models;
pub mod repositories;
pub mod seed;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
