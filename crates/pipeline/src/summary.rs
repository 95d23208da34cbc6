//! Livestock population summary per state.
//!
//! Lets users check the raw population figures behind the demand reports.
//! Totals are computed on demand from submissions, not from stored reports.

use serde::Serialize;
use sqlx::PgPool;
use vaxdemand_core::aggregation::{summarize_populations, PopulationTotals};
use vaxdemand_core::types::DbId;
use vaxdemand_db::models::state::State;
use vaxdemand_db::repositories::{FormSubmissionRepo, StateRepo};

use crate::error::PipelineError;

/// One summary row: `{ state_id, state_name, cattle, buffalo, sheep_goat,
/// pig, total_eligible_animals }`, figures rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LivestockSummary {
    pub state_id: DbId,
    pub state_name: String,
    #[serde(flatten)]
    pub totals: PopulationTotals,
}

/// Builds livestock summaries from stored submissions.
pub struct LivestockSummaryService;

impl LivestockSummaryService {
    /// Summaries for every state ordered by name, or for the single state
    /// `state_id`. An unknown `state_id` yields an empty list.
    pub async fn summaries(
        pool: &PgPool,
        state_id: Option<DbId>,
    ) -> Result<Vec<LivestockSummary>, PipelineError> {
        let states: Vec<State> = match state_id {
            Some(id) => StateRepo::find_by_id(pool, id).await?.into_iter().collect(),
            None => StateRepo::list(pool).await?,
        };

        let mut summaries = Vec::with_capacity(states.len());
        for state in &states {
            summaries.push(Self::summary_for_state(pool, state).await?);
        }
        Ok(summaries)
    }

    /// Summary for one state.
    pub async fn summary_for_state(
        pool: &PgPool,
        state: &State,
    ) -> Result<LivestockSummary, PipelineError> {
        let submissions = FormSubmissionRepo::list_by_state(pool, state.id).await?;
        let totals = summarize_populations(submissions.iter().map(|s| &s.form_data));

        Ok(LivestockSummary {
            state_id: state.id,
            state_name: state.name.clone(),
            totals,
        })
    }
}
