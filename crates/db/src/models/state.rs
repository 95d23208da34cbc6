//! State (administrative region) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxdemand_core::types::{DbId, Timestamp};

/// A row from the `states` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct State {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal `{ id, name }` projection used by pickers and listings.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StateOption {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a new state.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateState {
    pub name: String,
}
