//! Category model.

use inventory_core::inventory::CategoryCandidate;
use inventory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Category as listed by the API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

impl CreateCategory {
    pub fn candidate(&self) -> CategoryCandidate<'_> {
        CategoryCandidate { name: &self.name }
    }
}
