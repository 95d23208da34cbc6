//! Handlers for the `/livestock-summaries` resource.

use axum::extract::State;
use axum::Json;
use vaxdemand_pipeline::{LivestockSummary, LivestockSummaryService};

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::query::StateFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/livestock-summaries
///
/// Population totals per state, computed from the current submissions.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<StateFilterParams>,
) -> AppResult<Json<DataResponse<Vec<LivestockSummary>>>> {
    let summaries = LivestockSummaryService::summaries(&state.pool, params.state_id).await?;
    Ok(Json(DataResponse { data: summaries }))
}
