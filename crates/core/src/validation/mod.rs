//! Validation of inventory writes.
//!
//! - [`result`] -- the field→messages aggregate returned to callers.
//! - [`service`] -- product and category rules, evaluated against the store.

pub mod result;
pub mod service;

pub use result::{FieldErrors, ValidationResult};
pub use service::{validate_category, validate_product, InventoryLookup};
