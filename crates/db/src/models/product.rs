//! Product model.

use inventory_core::inventory::ProductCandidate;
use inventory_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: DbId,
    pub updated_at: Timestamp,
}

/// Product joined with its category name, as returned by the API.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: DbId,
    pub sku: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: DbId,
    pub category_name: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub sku: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: DbId,
}

impl ProductInput {
    pub fn candidate(&self) -> ProductCandidate<'_> {
        ProductCandidate {
            sku: &self.sku,
            name: &self.name,
            price: self.price,
            quantity: self.quantity,
            category_id: self.category_id,
        }
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductDetail>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}
