//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /          -> list     (?state_id=&vaccine=)
/// POST   /refresh   -> refresh  (?state_id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list))
        .route("/refresh", post(reports::refresh))
}
