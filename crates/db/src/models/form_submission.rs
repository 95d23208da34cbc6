//! Census submission model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxdemand_core::types::{DbId, Timestamp};

/// A row from the `form_submissions` table.
///
/// `form_data` is an opaque JSON object; its keys are interpreted by
/// `vaxdemand_core::fields`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FormSubmission {
    pub id: DbId,
    pub state_id: DbId,
    pub form_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFormSubmission {
    pub state_id: DbId,
    pub form_data: serde_json::Value,
}
