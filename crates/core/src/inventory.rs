//! Category and product field constraints.
//!
//! Candidates borrow from the request payload and carry the field-level
//! rules as `validator` attributes. Rules that need the store (uniqueness,
//! category existence) live in [`crate::validation::service`].

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use validator::{Validate, ValidationError};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum SKU length in characters.
pub const SKU_MIN_LEN: u64 = 3;

/// Maximum SKU length in characters.
pub const SKU_MAX_LEN: u64 = 32;

/// Uppercase ASCII letters and digits, at least one character.
pub const SKU_PATTERN: &str = r"^[A-Z0-9]+$";

static SKU_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SKU_PATTERN).expect("valid regex"));

// Field names as they appear on the wire and in validation results.
pub const FIELD_NAME: &str = "name";
pub const FIELD_SKU: &str = "sku";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_CATEGORY_ID: &str = "categoryId";

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// A category about to be written.
#[derive(Debug, Clone, Validate)]
pub struct CategoryCandidate<'a> {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: &'a str,
}

/// A product about to be written.
#[derive(Debug, Clone, Validate)]
pub struct ProductCandidate<'a> {
    #[validate(length(
        min = SKU_MIN_LEN,
        max = SKU_MAX_LEN,
        message = "SKU must be between 3 and 32 characters"
    ))]
    pub sku: &'a str,
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: &'a str,
    pub price: Decimal,
    pub quantity: i32,
    pub category_id: DbId,
}

/// Whether a validation runs for a new entity or an update of an existing one.
///
/// Uniqueness checks on update exclude the entity's own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update(DbId),
}

impl WriteMode {
    /// The id to exclude from uniqueness lookups, if any.
    pub fn excluded_id(self) -> Option<DbId> {
        match self {
            WriteMode::Create => None,
            WriteMode::Update(id) => Some(id),
        }
    }
}

/// Reject empty and whitespace-only strings.
fn not_blank<T: AsRef<str> + ?Sized>(value: &T) -> Result<(), ValidationError> {
    if value.as_ref().trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Check the SKU character rule (uppercase ASCII letters and digits only).
pub fn is_valid_sku_format(sku: &str) -> bool {
    SKU_RE.is_match(sku)
}
