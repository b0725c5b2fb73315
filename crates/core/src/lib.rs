//! Inventory domain core.
//!
//! Entity constraints, the validation service, the product listing query
//! model, and the write rate limiter. Nothing here touches the database or
//! HTTP; store reads go through [`validation::InventoryLookup`].

pub mod api_keys;
pub mod error;
pub mod inventory;
pub mod listing;
pub mod rate_limit;
pub mod types;
pub mod validation;
