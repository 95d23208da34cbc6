//! Handlers for the `/form-submissions` resource.
//!
//! Submissions are stored as received; nothing is recomputed until the next
//! demand refresh.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vaxdemand_core::error::CoreError;
use vaxdemand_core::types::{DbId, Timestamp};
use vaxdemand_db::models::form_submission::CreateFormSubmission;
use vaxdemand_db::repositories::{FormSubmissionRepo, StateRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Acknowledgement returned for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub id: DbId,
    pub state_id: DbId,
    pub created_at: Timestamp,
}

/// POST /api/v1/form-submissions
///
/// Returns 404 for an unknown state and 400 when `form_data` is not a
/// non-empty JSON object.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateFormSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmissionReceipt>>)> {
    validate_form_data(&input.form_data)?;

    StateRepo::find_by_id(&state.pool, input.state_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "State",
            id: input.state_id,
        }))?;

    let submission = FormSubmissionRepo::create(&state.pool, &input).await?;
    tracing::info!(
        submission_id = submission.id,
        state_id = submission.state_id,
        "Form submission recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmissionReceipt {
                id: submission.id,
                state_id: submission.state_id,
                created_at: submission.created_at,
            },
        }),
    ))
}

fn validate_form_data(form_data: &serde_json::Value) -> Result<(), CoreError> {
    match form_data.as_object() {
        Some(map) if !map.is_empty() => Ok(()),
        Some(_) => Err(CoreError::Validation("form_data must not be empty".into())),
        None => Err(CoreError::Validation("form_data must be a JSON object".into())),
    }
}
