//! Handlers for the `/reports` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use vaxdemand_core::types::DbId;
use vaxdemand_core::vaccine::Vaccine;
use vaxdemand_db::models::vaccine_demand_report::{ReportFilter, VaccineDemandReportWithState};
use vaxdemand_db::repositories::VaccineDemandReportRepo;
use vaxdemand_pipeline::{SyncReport, SyncService};

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::query::{blank_as_none, StateFilterParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the report listing.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub state_id: Option<DbId>,
    /// Vaccine label (`FMD`, `Brucellosis`, ...). Blank means no filter.
    pub vaccine: Option<String>,
}

impl ReportQuery {
    fn into_filter(self) -> AppResult<ReportFilter> {
        let vaccine = match self.vaccine.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => Some(Vaccine::from_str_value(label)?),
            _ => None,
        };
        Ok(ReportFilter {
            state_id: self.state_id,
            vaccine,
        })
    }
}

/// Outcome of a manual refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: SyncReport,
}

/// GET /api/v1/reports
///
/// Stored demand rows joined with the state name. Unknown vaccine labels are
/// rejected with 400 `INVALID_ARGUMENT`.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ReportQuery>,
) -> AppResult<Json<DataResponse<Vec<VaccineDemandReportWithState>>>> {
    let filter = params.into_filter()?;
    let reports = VaccineDemandReportRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// POST /api/v1/reports/refresh
///
/// Recompute demand for every state, or only `?state_id=`. Safe to repeat.
pub async fn refresh(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<StateFilterParams>,
) -> AppResult<Json<DataResponse<RefreshResponse>>> {
    let report = SyncService::sync_scope(&state.pool, params.state_id).await?;

    tracing::info!(
        state_id = ?params.state_id,
        states_synced = report.states_synced,
        reports_written = report.reports_written,
        "Demand refresh requested"
    );

    Ok(Json(DataResponse {
        data: RefreshResponse {
            message: "Vaccine demand reports refreshed".to_string(),
            report,
        },
    }))
}
