//! Vaccine demand report model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vaxdemand_core::demand::VaccineMetric;
use vaxdemand_core::types::{DbId, Timestamp};
use vaxdemand_core::vaccine::Vaccine;

/// A row from the `vaccine_demand_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VaccineDemandReport {
    pub id: DbId,
    pub state_id: DbId,
    pub vaccine: String,
    pub eligible_animals: f64,
    pub new_birth_eligible: f64,
    pub adjusted_eligible: f64,
    pub current_inventory: f64,
    pub annual_dose_requirement: f64,
    pub after_losses: f64,
    pub after_buffer: f64,
    pub monthly_demand: f64,
    pub half_yearly_demand: f64,
    pub annual_demand: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VaccineDemandReport {
    /// The stored metric fields.
    pub fn metric(&self) -> VaccineMetric {
        VaccineMetric {
            eligible_animals: self.eligible_animals,
            new_birth_eligible: self.new_birth_eligible,
            adjusted_eligible: self.adjusted_eligible,
            current_inventory: self.current_inventory,
            annual_dose_requirement: self.annual_dose_requirement,
            after_losses: self.after_losses,
            after_buffer: self.after_buffer,
            monthly_demand: self.monthly_demand,
            half_yearly_demand: self.half_yearly_demand,
            annual_demand: self.annual_demand,
        }
    }
}

/// A report row joined with its state's name, as served by the read API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VaccineDemandReportWithState {
    pub id: DbId,
    pub state_id: DbId,
    pub state_name: String,
    pub vaccine: String,
    pub eligible_animals: f64,
    pub new_birth_eligible: f64,
    pub adjusted_eligible: f64,
    pub current_inventory: f64,
    pub annual_dose_requirement: f64,
    pub after_losses: f64,
    pub after_buffer: f64,
    pub monthly_demand: f64,
    pub half_yearly_demand: f64,
    pub annual_demand: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting one (state, vaccine) report.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertVaccineDemandReport {
    pub state_id: DbId,
    pub vaccine: Vaccine,
    #[serde(flatten)]
    pub metric: VaccineMetric,
}

/// Optional filters for listing reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    pub state_id: Option<DbId>,
    pub vaccine: Option<Vaccine>,
}
