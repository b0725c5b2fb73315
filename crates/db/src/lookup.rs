//! Store-backed [`InventoryLookup`] for the validation service.

use async_trait::async_trait;
use inventory_core::types::DbId;
use inventory_core::validation::InventoryLookup;
use sqlx::PgPool;

use crate::repositories::{CategoryRepo, ProductRepo};

/// Answers validation lookups with fresh queries against the pool.
#[derive(Clone, Copy)]
pub struct PgInventoryLookup<'a> {
    pool: &'a PgPool,
}

impl<'a> PgInventoryLookup<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryLookup for PgInventoryLookup<'_> {
    type Error = sqlx::Error;

    async fn sku_taken(&self, sku: &str, exclude_id: Option<DbId>) -> Result<bool, sqlx::Error> {
        ProductRepo::sku_taken(self.pool, sku, exclude_id).await
    }

    async fn category_name_taken(
        &self,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        CategoryRepo::name_taken(self.pool, name, exclude_id).await
    }

    async fn category_exists(&self, id: DbId) -> Result<bool, sqlx::Error> {
        CategoryRepo::exists(self.pool, id).await
    }
}
