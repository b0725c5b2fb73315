//! Product and category validation against current store state.
//!
//! Every rule is evaluated; nothing short-circuits, so callers can show all
//! problems at once. Store reads happen on every call through
//! [`InventoryLookup`].

use async_trait::async_trait;
use rust_decimal::Decimal;
use validator::Validate;

use super::result::ValidationResult;
use crate::inventory::{
    is_valid_sku_format, CategoryCandidate, ProductCandidate, WriteMode, FIELD_CATEGORY_ID,
    FIELD_NAME, FIELD_PRICE, FIELD_QUANTITY, FIELD_SKU,
};
use crate::types::DbId;

/// Read-only store queries needed by the validation rules.
///
/// `exclude_id` skips the entity being updated so it does not collide with
/// itself.
#[async_trait]
pub trait InventoryLookup: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether a product other than `exclude_id` already uses `sku` (exact match).
    async fn sku_taken(&self, sku: &str, exclude_id: Option<DbId>) -> Result<bool, Self::Error>;

    /// Whether a category other than `exclude_id` already uses `name` (exact match).
    async fn category_name_taken(
        &self,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, Self::Error>;

    /// Whether a category with this id exists.
    async fn category_exists(&self, id: DbId) -> Result<bool, Self::Error>;
}

/// Validate a product for create or update.
pub async fn validate_product<L>(
    lookup: &L,
    candidate: &ProductCandidate<'_>,
    mode: WriteMode,
) -> Result<ValidationResult, L::Error>
where
    L: InventoryLookup + ?Sized,
{
    let mut result = ValidationResult::new();

    if let Err(errors) = candidate.validate() {
        result.merge_field_errors(&errors);
    }

    if candidate.price <= Decimal::ZERO {
        result.add_error(FIELD_PRICE, "Price must be greater than 0");
    }

    if candidate.quantity < 0 {
        result.add_error(FIELD_QUANTITY, "Quantity cannot be negative");
    }

    if lookup.sku_taken(candidate.sku, mode.excluded_id()).await? {
        result.add_error(
            FIELD_SKU,
            format!("SKU '{}' already exists", candidate.sku),
        );
    }

    if !lookup.category_exists(candidate.category_id).await? {
        result.add_error(FIELD_CATEGORY_ID, "Selected category does not exist");
    }

    if !candidate.sku.is_empty() && !is_valid_sku_format(candidate.sku) {
        result.add_error(
            FIELD_SKU,
            "SKU must contain only uppercase letters and numbers",
        );
    }

    Ok(result)
}

/// Validate a category for create or update.
pub async fn validate_category<L>(
    lookup: &L,
    candidate: &CategoryCandidate<'_>,
    mode: WriteMode,
) -> Result<ValidationResult, L::Error>
where
    L: InventoryLookup + ?Sized,
{
    let mut result = ValidationResult::new();

    if let Err(errors) = candidate.validate() {
        result.merge_field_errors(&errors);
    }

    if lookup
        .category_name_taken(candidate.name, mode.excluded_id())
        .await?
    {
        result.add_error(
            FIELD_NAME,
            format!("Category name '{}' already exists", candidate.name),
        );
    }

    Ok(result)
}
