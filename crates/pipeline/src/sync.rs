//! Vaccine demand synchronization.
//!
//! Every run recomputes each state's demand from its submissions and
//! overwrites the stored reports by `(state_id, vaccine)`. Nothing is
//! accumulated across runs, so repeating a sync over unchanged submissions
//! stores identical figures, and an interrupted run can simply be restarted.
//!
//! A state is the atomic unit: its five reports are written in one
//! transaction. A full sync stops at the first failing state; states synced
//! before it remain committed.

use serde::Serialize;
use sqlx::PgPool;
use vaxdemand_core::aggregation::aggregate;
use vaxdemand_core::error::CoreError;
use vaxdemand_core::types::DbId;
use vaxdemand_db::models::state::State;
use vaxdemand_db::models::vaccine_demand_report::VaccineDemandReport;
use vaxdemand_db::repositories::{FormSubmissionRepo, StateRepo, VaccineDemandReportRepo};

use crate::error::PipelineError;

/// Outcome of a successful sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub states_synced: usize,
    pub reports_written: usize,
}

/// Recomputes and persists vaccine demand reports.
pub struct SyncService;

impl SyncService {
    /// Sync every state, in ID order.
    ///
    /// Returns [`PipelineError::StateSync`] for the first state that fails.
    pub async fn sync_all(pool: &PgPool) -> Result<SyncReport, PipelineError> {
        let states = StateRepo::list_by_id(pool).await?;
        tracing::info!(states = states.len(), "Vaccine demand sync started");

        let mut report = SyncReport::default();
        for state in &states {
            match Self::sync_region(pool, state).await {
                Ok(rows) => {
                    report.states_synced += 1;
                    report.reports_written += rows.len();
                }
                Err(e) => {
                    tracing::error!(
                        state_id = state.id,
                        state = %state.name,
                        synced_before = report.states_synced,
                        error = %e,
                        "Vaccine demand sync aborted"
                    );
                    return Err(PipelineError::StateSync {
                        state_id: state.id,
                        state_name: state.name.clone(),
                        synced_before: report.states_synced,
                        source: Box::new(e),
                    });
                }
            }
        }

        tracing::info!(
            states_synced = report.states_synced,
            reports_written = report.reports_written,
            "Vaccine demand sync finished"
        );
        Ok(report)
    }

    /// Sync the single state `state_id`, or every state when `None`.
    pub async fn sync_scope(
        pool: &PgPool,
        state_id: Option<DbId>,
    ) -> Result<SyncReport, PipelineError> {
        match state_id {
            Some(id) => {
                let rows = Self::sync_region_by_id(pool, id).await?;
                Ok(SyncReport {
                    states_synced: 1,
                    reports_written: rows.len(),
                })
            }
            None => Self::sync_all(pool).await,
        }
    }

    /// Recompute one state's demand from scratch and upsert a report per
    /// vaccine. A state without submissions gets all-zero reports.
    pub async fn sync_region(
        pool: &PgPool,
        state: &State,
    ) -> Result<Vec<VaccineDemandReport>, PipelineError> {
        let submissions = FormSubmissionRepo::list_by_state(pool, state.id).await?;
        let metrics = aggregate(submissions.iter().map(|s| &s.form_data));

        let rows = VaccineDemandReportRepo::upsert_for_state(pool, state.id, &metrics).await?;

        tracing::info!(
            state_id = state.id,
            state = %state.name,
            submissions = submissions.len(),
            "State vaccine demand synced"
        );
        Ok(rows)
    }

    /// Sync a single state by ID.
    pub async fn sync_region_by_id(
        pool: &PgPool,
        state_id: DbId,
    ) -> Result<Vec<VaccineDemandReport>, PipelineError> {
        let state = StateRepo::find_by_id(pool, state_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "State",
                id: state_id,
            })?;
        Self::sync_region(pool, &state).await
    }
}
