//! Shared response body types for API handlers.

use inventory_core::types::DbId;
use serde::Serialize;

/// `{ "id": ... }` body returned by create endpoints with `201 Created`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: DbId,
}
