//! Route definitions for the `/livestock-summaries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::livestock_summaries;
use crate::state::AppState;

/// Routes mounted at `/livestock-summaries`.
///
/// ```text
/// GET    /    -> list   (?state_id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(livestock_summaries::list))
}
