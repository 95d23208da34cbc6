//! Handlers for the `/states` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vaxdemand_core::error::CoreError;
use vaxdemand_db::models::state::{CreateState, State as Region, StateOption};
use vaxdemand_db::repositories::StateRepo;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/states
///
/// `{ id, name }` for every state, ordered by name.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StateOption>>>> {
    let states = StateRepo::list_options(&state.pool).await?;
    Ok(Json(DataResponse { data: states }))
}

/// POST /api/v1/states
///
/// A taken name surfaces as 409 through the `uq_states_name` constraint.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateState>,
) -> AppResult<(StatusCode, Json<DataResponse<Region>>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("State name must not be blank".into()).into());
    }

    let region = StateRepo::create(&state.pool, &input).await?;
    tracing::info!(state_id = region.id, name = %region.name, "State created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: region })))
}
