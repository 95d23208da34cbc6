//! Route definitions for the `/states` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::states;
use crate::state::AppState;

/// Routes mounted at `/states`.
///
/// ```text
/// GET    /    -> list
/// POST   /    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(states::list).post(states::create))
}
