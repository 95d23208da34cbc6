pub mod form_submissions;
pub mod health;
pub mod livestock_summaries;
pub mod reports;
pub mod states;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /states                          list, create
/// /form-submissions                record a census submission (POST)
/// /reports                         stored demand (?state_id=&vaccine=)
/// /reports/refresh                 recompute demand (POST, ?state_id=)
/// /livestock-summaries             population totals (?state_id=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/states", states::router())
        .nest("/form-submissions", form_submissions::router())
        .nest("/reports", reports::router())
        .nest("/livestock-summaries", livestock_summaries::router())
}
