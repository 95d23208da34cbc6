//! Repository for the `form_submissions` table.

use sqlx::PgPool;
use vaxdemand_core::types::DbId;

use crate::models::form_submission::{CreateFormSubmission, FormSubmission};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, state_id, form_data, created_at, updated_at";

/// Provides data access for census submissions.
pub struct FormSubmissionRepo;

impl FormSubmissionRepo {
    /// Insert a new submission, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFormSubmission,
    ) -> Result<FormSubmission, sqlx::Error> {
        let query = format!(
            "INSERT INTO form_submissions (state_id, form_data)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(input.state_id)
            .bind(&input.form_data)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FormSubmission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM form_submissions WHERE id = $1");
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every submission of a state, oldest first.
    pub async fn list_by_state(
        pool: &PgPool,
        state_id: DbId,
    ) -> Result<Vec<FormSubmission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM form_submissions
             WHERE state_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, FormSubmission>(&query)
            .bind(state_id)
            .fetch_all(pool)
            .await
    }

    /// Count the submissions of a state.
    pub async fn count_by_state(pool: &PgPool, state_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM form_submissions WHERE state_id = $1")
            .bind(state_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Permanently delete a submission. Returns `true` if a row was removed.
    ///
    /// Stored reports are untouched until the next sync.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM form_submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
