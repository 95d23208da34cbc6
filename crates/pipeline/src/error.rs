use vaxdemand_core::error::CoreError;
use vaxdemand_core::types::DbId;

/// Errors raised while syncing or summarising states.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A domain-level error (e.g. an unknown state id).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage-layer failure: connectivity, constraint violation, etc.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A full sync stopped at one state. States synced before it stay
    /// committed.
    #[error("Sync of state '{state_name}' (id {state_id}) failed after {synced_before} state(s) succeeded: {source}")]
    StateSync {
        state_id: DbId,
        state_name: String,
        synced_before: usize,
        source: Box<PipelineError>,
    },
}
