//! Repository for the `vaccine_demand_reports` table.
//!
//! Rows are keyed by the natural key `(state_id, vaccine)`; writes are
//! upserts that overwrite every metric column. Values are rounded to two
//! decimals on the way in, so the table never holds more precision than is
//! displayed.

use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use vaxdemand_core::demand::{VaccineMetric, VaccineMetrics};
use vaxdemand_core::types::DbId;
use vaxdemand_core::vaccine::Vaccine;

use crate::models::vaccine_demand_report::{
    ReportFilter, UpsertVaccineDemandReport, VaccineDemandReport, VaccineDemandReportWithState,
};

/// Column list for vaccine_demand_reports queries.
const COLUMNS: &str = "id, state_id, vaccine, eligible_animals, new_birth_eligible, \
    adjusted_eligible, current_inventory, annual_dose_requirement, after_losses, \
    after_buffer, monthly_demand, half_yearly_demand, annual_demand, created_at, updated_at";

/// Same columns qualified for the join with `states` (aliased `r` / `s`).
const JOINED_COLUMNS: &str = "r.id, r.state_id, s.name AS state_name, r.vaccine, \
    r.eligible_animals, r.new_birth_eligible, r.adjusted_eligible, r.current_inventory, \
    r.annual_dose_requirement, r.after_losses, r.after_buffer, r.monthly_demand, \
    r.half_yearly_demand, r.annual_demand, r.created_at, r.updated_at";

/// Sort key placing vaccines in forecast order rather than alphabetically.
const VACCINE_ORDER: &str = "array_position(ARRAY['FMD','Brucellosis','PPR','CSF','LSD'], r.vaccine)";

/// Provides data access for aggregated vaccine demand.
pub struct VaccineDemandReportRepo;

impl VaccineDemandReportRepo {
    /// Upsert a single (state, vaccine) report.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertVaccineDemandReport,
    ) -> Result<VaccineDemandReport, sqlx::Error> {
        upsert_one(pool, input.state_id, input.vaccine, &input.metric).await
    }

    /// Upsert every vaccine of one state inside a single transaction.
    ///
    /// Either all rows of the state are written or none are.
    pub async fn upsert_for_state(
        pool: &PgPool,
        state_id: DbId,
        metrics: &VaccineMetrics,
    ) -> Result<Vec<VaccineDemandReport>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut results = Vec::with_capacity(metrics.len());

        for (vaccine, metric) in metrics {
            let row = upsert_one(&mut *tx, state_id, *vaccine, metric).await?;
            results.push(row);
        }

        tx.commit().await?;
        tracing::debug!(state_id, rows = results.len(), "Vaccine demand reports upserted");
        Ok(results)
    }

    /// Find the report for one (state, vaccine) pair.
    pub async fn find_by_state_and_vaccine(
        pool: &PgPool,
        state_id: DbId,
        vaccine: Vaccine,
    ) -> Result<Option<VaccineDemandReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vaccine_demand_reports
             WHERE state_id = $1 AND vaccine = $2"
        );
        sqlx::query_as::<_, VaccineDemandReport>(&query)
            .bind(state_id)
            .bind(vaccine.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List the reports of one state in forecast order.
    pub async fn list_by_state(
        pool: &PgPool,
        state_id: DbId,
    ) -> Result<Vec<VaccineDemandReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vaccine_demand_reports r
             WHERE r.state_id = $1
             ORDER BY {VACCINE_ORDER}"
        );
        sqlx::query_as::<_, VaccineDemandReport>(&query)
            .bind(state_id)
            .fetch_all(pool)
            .await
    }

    /// List reports joined with their state's name, optionally filtered by
    /// state and/or vaccine. Ordered by state name, then forecast order.
    pub async fn list(
        pool: &PgPool,
        filter: &ReportFilter,
    ) -> Result<Vec<VaccineDemandReportWithState>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM vaccine_demand_reports r
             JOIN states s ON s.id = r.state_id
             WHERE ($1::BIGINT IS NULL OR r.state_id = $1)
               AND ($2::TEXT IS NULL OR r.vaccine = $2)
             ORDER BY s.name ASC, {VACCINE_ORDER}"
        );
        sqlx::query_as::<_, VaccineDemandReportWithState>(&query)
            .bind(filter.state_id)
            .bind(filter.vaccine.map(|v| v.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Count all stored reports.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vaccine_demand_reports")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

/// Insert or overwrite one report row on any executor (pool or transaction).
async fn upsert_one<'e, E>(
    executor: E,
    state_id: DbId,
    vaccine: Vaccine,
    metric: &VaccineMetric,
) -> Result<VaccineDemandReport, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let m = metric.rounded();
    let query = format!(
        "INSERT INTO vaccine_demand_reports
            (state_id, vaccine, eligible_animals, new_birth_eligible, adjusted_eligible,
             current_inventory, annual_dose_requirement, after_losses, after_buffer,
             monthly_demand, half_yearly_demand, annual_demand)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         ON CONFLICT (state_id, vaccine) DO UPDATE SET
            eligible_animals = EXCLUDED.eligible_animals,
            new_birth_eligible = EXCLUDED.new_birth_eligible,
            adjusted_eligible = EXCLUDED.adjusted_eligible,
            current_inventory = EXCLUDED.current_inventory,
            annual_dose_requirement = EXCLUDED.annual_dose_requirement,
            after_losses = EXCLUDED.after_losses,
            after_buffer = EXCLUDED.after_buffer,
            monthly_demand = EXCLUDED.monthly_demand,
            half_yearly_demand = EXCLUDED.half_yearly_demand,
            annual_demand = EXCLUDED.annual_demand
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, VaccineDemandReport>(&query)
        .bind(state_id)
        .bind(vaccine.as_str())
        .bind(m.eligible_animals)
        .bind(m.new_birth_eligible)
        .bind(m.adjusted_eligible)
        .bind(m.current_inventory)
        .bind(m.annual_dose_requirement)
        .bind(m.after_losses)
        .bind(m.after_buffer)
        .bind(m.monthly_demand)
        .bind(m.half_yearly_demand)
        .bind(m.annual_demand)
        .fetch_one(executor)
        .await
}
