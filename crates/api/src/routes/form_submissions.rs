//! Route definitions for the `/form-submissions` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::form_submissions;
use crate::state::AppState;

/// Routes mounted at `/form-submissions`.
///
/// ```text
/// POST   /    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(form_submissions::create))
}
