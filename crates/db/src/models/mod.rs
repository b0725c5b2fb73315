//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row and a `Deserialize` DTO for writes.

pub mod category;
pub mod product;
