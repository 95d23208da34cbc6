//! Repository for the `states` table.

use sqlx::PgPool;
use vaxdemand_core::types::DbId;

use crate::models::state::{CreateState, State, StateOption};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for states.
pub struct StateRepo;

impl StateRepo {
    /// Insert a new state, returning the created row.
    ///
    /// Fails with a unique violation on `uq_states_name` if the name is taken.
    pub async fn create(pool: &PgPool, input: &CreateState) -> Result<State, sqlx::Error> {
        let query = format!(
            "INSERT INTO states (name) VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, State>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    /// Find a state by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<State>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM states WHERE id = $1");
        sqlx::query_as::<_, State>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a state by its exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<State>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM states WHERE name = $1");
        sqlx::query_as::<_, State>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all states ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<State>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM states ORDER BY name ASC");
        sqlx::query_as::<_, State>(&query).fetch_all(pool).await
    }

    /// List `{ id, name }` pairs ordered by name.
    pub async fn list_options(pool: &PgPool) -> Result<Vec<StateOption>, sqlx::Error> {
        sqlx::query_as::<_, StateOption>("SELECT id, name FROM states ORDER BY name ASC")
            .fetch_all(pool)
            .await
    }

    /// List all states in insertion (ID) order, the order sync walks them.
    pub async fn list_by_id(pool: &PgPool) -> Result<Vec<State>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM states ORDER BY id ASC");
        sqlx::query_as::<_, State>(&query).fetch_all(pool).await
    }

    /// Delete a state. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while submissions still reference
    /// the state; its demand reports are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM states WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
