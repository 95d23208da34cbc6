//! Per-submission vaccine demand calculation.
//!
//! For every vaccine the calculator runs the same staged formula:
//!
//! 1. eligible animals (vaccine-specific population rule)
//! 2. new-birth eligible = eligible x calving rate x female-calf fraction
//! 3. adjusted eligible = coverage x (eligible + new births)
//! 4. current inventory (reported stock, informational)
//! 5. annual dose requirement = doses per year x adjusted eligible
//! 6. after losses = (1 + wastage) x annual dose requirement
//! 7. after buffer = (1 + buffer) x after losses, which is the annual demand
//!
//! Nothing here rounds; rounding happens at the storage/display boundary.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::fields::{resolve_float, resolve_percent, CanonicalKey, FieldSource};
use crate::vaccine::Vaccine;

// ---------------------------------------------------------------------------
// Assumptions
// ---------------------------------------------------------------------------

/// Fraction of eligible animals calving per year.
pub const DEFAULT_CALVING_RATE: f64 = 0.55;
/// Fraction of calves that are female.
pub const DEFAULT_FEMALE_CALF_PCT: f64 = 0.45;
/// Target coverage when the submission gives none.
pub const DEFAULT_COVERAGE_PCT: f64 = 0.95;
/// Expected dose wastage when the submission gives none.
pub const DEFAULT_WASTAGE_PCT: f64 = 0.10;
/// Safety margin when the submission gives none.
pub const DEFAULT_BUFFER_PCT: f64 = 0.15;
/// Share of the bovine herd targeted by the Brucellosis programme.
pub const BRUCELLOSIS_FEMALE_PCT: f64 = 0.45;

/// Months per year, for the monthly demand split.
pub const MONTHS_PER_YEAR: f64 = 12.0;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Livestock head counts reported by one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Populations {
    pub cattle: f64,
    pub buffalo: f64,
    pub sheep_goat: f64,
    pub pig: f64,
}

impl Populations {
    /// Resolve all four counts, defaulting each to zero.
    pub fn from_payload<P: FieldSource + ?Sized>(payload: &P) -> Self {
        Self {
            cattle: resolve_float(payload, CanonicalKey::PopulationCattle, 0.0),
            buffalo: resolve_float(payload, CanonicalKey::PopulationBuffalo, 0.0),
            sheep_goat: resolve_float(payload, CanonicalKey::PopulationSheepGoat, 0.0),
            pig: resolve_float(payload, CanonicalKey::PopulationPig, 0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.cattle + self.buffalo + self.sheep_goat + self.pig
    }
}

impl AddAssign for Populations {
    fn add_assign(&mut self, rhs: Self) {
        self.cattle += rhs.cattle;
        self.buffalo += rhs.buffalo;
        self.sheep_goat += rhs.sheep_goat;
        self.pig += rhs.pig;
    }
}

/// Programme parameters as fractions (0.95, not 95).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgramParameters {
    pub coverage: f64,
    pub wastage: f64,
    pub buffer: f64,
}

impl Default for ProgramParameters {
    fn default() -> Self {
        Self {
            coverage: DEFAULT_COVERAGE_PCT,
            wastage: DEFAULT_WASTAGE_PCT,
            buffer: DEFAULT_BUFFER_PCT,
        }
    }
}

impl ProgramParameters {
    /// Resolve the percentage overrides (submitted on a 0-100 scale),
    /// falling back to the defaults for any that are missing.
    pub fn from_payload<P: FieldSource + ?Sized>(payload: &P) -> Self {
        let defaults = Self::default();
        let fraction = |key: CanonicalKey, default: f64| {
            resolve_percent(payload, key).map_or(default, |pct| pct / 100.0)
        };
        Self {
            coverage: fraction(CanonicalKey::CoveragePercent, defaults.coverage),
            wastage: fraction(CanonicalKey::WastagePercent, defaults.wastage),
            buffer: fraction(CanonicalKey::BufferPercent, defaults.buffer),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Demand figures for one vaccine, for one submission or summed over a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VaccineMetric {
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
}

impl VaccineMetric {
    /// All fields as `(name, value)` pairs, in column order.
    pub fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("eligible_animals", self.eligible_animals),
            ("new_birth_eligible", self.new_birth_eligible),
            ("adjusted_eligible", self.adjusted_eligible),
            ("current_inventory", self.current_inventory),
            ("annual_dose_requirement", self.annual_dose_requirement),
            ("after_losses", self.after_losses),
            ("after_buffer", self.after_buffer),
            ("monthly_demand", self.monthly_demand),
            ("half_yearly_demand", self.half_yearly_demand),
            ("annual_demand", self.annual_demand),
        ]
    }

    /// A copy with every field rounded to two decimals, for storage.
    ///
    /// A field that overflowed to a non-finite value is stored as zero and
    /// logged.
    pub fn rounded(&self) -> Self {
        let r = |name: &str, value: f64| storable(name, value);
        Self {
            eligible_animals: r("eligible_animals", self.eligible_animals),
            new_birth_eligible: r("new_birth_eligible", self.new_birth_eligible),
            adjusted_eligible: r("adjusted_eligible", self.adjusted_eligible),
            current_inventory: r("current_inventory", self.current_inventory),
            annual_dose_requirement: r("annual_dose_requirement", self.annual_dose_requirement),
            after_losses: r("after_losses", self.after_losses),
            after_buffer: r("after_buffer", self.after_buffer),
            monthly_demand: r("monthly_demand", self.monthly_demand),
            half_yearly_demand: r("half_yearly_demand", self.half_yearly_demand),
            annual_demand: r("annual_demand", self.annual_demand),
        }
    }
}

fn storable(name: &str, value: f64) -> f64 {
    if value.is_finite() {
        round2(value)
    } else {
        tracing::warn!(field = name, value = %value, "Non-finite metric, storing zero");
        0.0
    }
}

impl AddAssign for VaccineMetric {
    fn add_assign(&mut self, rhs: Self) {
        self.eligible_animals += rhs.eligible_animals;
        self.new_birth_eligible += rhs.new_birth_eligible;
        self.adjusted_eligible += rhs.adjusted_eligible;
        self.current_inventory += rhs.current_inventory;
        self.annual_dose_requirement += rhs.annual_dose_requirement;
        self.after_losses += rhs.after_losses;
        self.after_buffer += rhs.after_buffer;
        self.monthly_demand += rhs.monthly_demand;
        self.half_yearly_demand += rhs.half_yearly_demand;
        self.annual_demand += rhs.annual_demand;
    }
}

/// One metric per vaccine, iterated in forecast order.
pub type VaccineMetrics = BTreeMap<Vaccine, VaccineMetric>;

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Animals targeted by `vaccine`'s programme.
pub fn eligible_animals(vaccine: Vaccine, populations: &Populations) -> f64 {
    match vaccine {
        Vaccine::Fmd => populations.total(),
        Vaccine::Brucellosis => BRUCELLOSIS_FEMALE_PCT * (populations.cattle + populations.buffalo),
        Vaccine::Ppr => populations.sheep_goat,
        Vaccine::Csf => populations.pig,
        Vaccine::Lsd => populations.cattle,
    }
}

/// Run the staged formula for one vaccine.
pub fn calculate_for_vaccine(
    vaccine: Vaccine,
    populations: &Populations,
    params: &ProgramParameters,
    current_inventory: f64,
) -> VaccineMetric {
    let eligible = eligible_animals(vaccine, populations);

    // Derived from this vaccine's own eligible animals, never from the
    // submission's all-species new birth figure.
    let new_birth_eligible = eligible * DEFAULT_CALVING_RATE * DEFAULT_FEMALE_CALF_PCT;

    let adjusted_eligible = params.coverage * (eligible + new_birth_eligible);
    let annual_dose_requirement = vaccine.doses_per_year() * adjusted_eligible;
    let after_losses = (1.0 + params.wastage) * annual_dose_requirement;
    let after_buffer = (1.0 + params.buffer) * after_losses;

    let annual_demand = after_buffer;

    VaccineMetric {
        eligible_animals: eligible,
        new_birth_eligible,
        adjusted_eligible,
        current_inventory,
        annual_dose_requirement,
        after_losses,
        after_buffer,
        monthly_demand: annual_demand / MONTHS_PER_YEAR,
        half_yearly_demand: annual_demand / 2.0,
        annual_demand,
    }
}

/// Compute the metrics of every vaccine for one submission payload.
///
/// Missing fields default (populations and stock to zero, percentages to
/// the programme defaults), so an empty payload yields all-zero metrics.
pub fn calculate_all<P: FieldSource + ?Sized>(payload: &P) -> VaccineMetrics {
    let populations = Populations::from_payload(payload);
    let params = ProgramParameters::from_payload(payload);

    Vaccine::ALL
        .into_iter()
        .map(|vaccine| {
            let stock = resolve_float(payload, vaccine.stock_key(), 0.0);
            let metric = calculate_for_vaccine(vaccine, &populations, &params, stock);
            (vaccine, metric)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_demand_identities(metric: &VaccineMetric) {
        assert_eq!(metric.annual_demand, metric.after_buffer);
        approx(metric.monthly_demand, metric.annual_demand / 12.0);
        approx(metric.half_yearly_demand, metric.annual_demand / 2.0);
    }

    // -- eligible animals --

    #[test]
    fn eligible_rules_per_vaccine() {
        let pops = Populations {
            cattle: 100.0,
            buffalo: 50.0,
            sheep_goat: 30.0,
            pig: 20.0,
        };
        approx(eligible_animals(Vaccine::Fmd, &pops), 200.0);
        approx(eligible_animals(Vaccine::Brucellosis, &pops), 67.5);
        approx(eligible_animals(Vaccine::Ppr, &pops), 30.0);
        approx(eligible_animals(Vaccine::Csf, &pops), 20.0);
        approx(eligible_animals(Vaccine::Lsd, &pops), 100.0);
    }

    #[test]
    fn brucellosis_ignores_small_ruminants_and_pigs() {
        let payload = json!({
            "population_cattle": 100,
            "population_buffalo": 100,
            "population_sheep_goat": 5000,
            "population_pig": 700,
        });
        let metrics = calculate_all(&payload);
        approx(metrics[&Vaccine::Brucellosis].eligible_animals, 90.0);
    }

    // -- full chain --

    #[test]
    fn fmd_chain_with_default_parameters() {
        let payload = json!({
            "population_cattle": 100,
            "population_buffalo": 0,
            "population_sheep_goat": 0,
            "population_pig": 0,
        });
        let fmd = calculate_all(&payload)[&Vaccine::Fmd];

        approx(fmd.eligible_animals, 100.0);
        approx(fmd.new_birth_eligible, 24.75);
        approx(fmd.adjusted_eligible, 118.5125);
        approx(fmd.annual_dose_requirement, 237.025);
        approx(fmd.after_losses, 260.7275);
        approx(fmd.after_buffer, 299.836625);
        assert_demand_identities(&fmd);
        assert_eq!(fmd.rounded().annual_demand, 299.84);
    }

    #[test]
    fn lsd_chain_with_explicit_parameters() {
        let payload = json!({
            "population_cattle": 10,
            "coverage_percent": 100,
            "wastage_percent": 0,
            "buffer_percent": 0,
        });
        let lsd = calculate_all(&payload)[&Vaccine::Lsd];

        approx(lsd.eligible_animals, 10.0);
        approx(lsd.new_birth_eligible, 2.475);
        approx(lsd.adjusted_eligible, 12.475);
        approx(lsd.annual_dose_requirement, 12.475);
        approx(lsd.after_losses, 12.475);
        approx(lsd.after_buffer, 12.475);
        approx(lsd.annual_demand, 12.475);
    }

    #[test]
    fn percentages_given_as_strings_and_aliases() {
        let payload = json!({
            "population of cattle": "10",
            "coverage % (target of vaccine coverage)": "80",
            "Wastage % (wastage during operation and in-transit)": "5",
            "Buffer %": "10",
        });
        let params = ProgramParameters::from_payload(&payload);
        approx(params.coverage, 0.80);
        approx(params.wastage, 0.05);
        approx(params.buffer, 0.10);
    }

    #[test]
    fn blank_percentage_uses_default() {
        let payload = json!({ "coverage_percent": "", "wastage_percent": "  " });
        assert_eq!(ProgramParameters::from_payload(&payload), ProgramParameters::default());
    }

    #[test]
    fn zero_percent_is_an_override_not_a_default() {
        let payload = json!({ "coverage_percent": 0 });
        approx(ProgramParameters::from_payload(&payload).coverage, 0.0);
    }

    #[test]
    fn inventory_comes_from_vaccine_specific_stock() {
        let payload = json!({
            "stock_fmd": 500,
            "Existing Vaccine Stock - PPR": "120",
        });
        let metrics = calculate_all(&payload);
        approx(metrics[&Vaccine::Fmd].current_inventory, 500.0);
        approx(metrics[&Vaccine::Ppr].current_inventory, 120.0);
        approx(metrics[&Vaccine::Lsd].current_inventory, 0.0);
    }

    #[test]
    fn inventory_does_not_reduce_demand() {
        let without = calculate_all(&json!({ "population_pig": 40 }));
        let with = calculate_all(&json!({ "population_pig": 40, "stock_csf": 1000 }));
        assert_eq!(
            without[&Vaccine::Csf].annual_demand,
            with[&Vaccine::Csf].annual_demand
        );
    }

    #[test]
    fn new_births_ignore_all_species_field() {
        let base = calculate_all(&json!({ "population_cattle": 100 }));
        let with_births = calculate_all(&json!({
            "population_cattle": 100,
            "estimated_annual_new_birth": 99999,
        }));
        assert_eq!(base, with_births);
    }

    // -- edge cases --

    #[test]
    fn empty_payload_yields_all_zero_metrics() {
        let metrics = calculate_all(&json!({}));
        assert_eq!(metrics.len(), Vaccine::ALL.len());
        for metric in metrics.values() {
            assert_eq!(*metric, VaccineMetric::default());
        }
    }

    #[test]
    fn malformed_population_only_zeroes_that_field() {
        let payload = json!({
            "population_cattle": "lots",
            "population_pig": 10,
        });
        let metrics = calculate_all(&payload);
        approx(metrics[&Vaccine::Lsd].eligible_animals, 0.0);
        approx(metrics[&Vaccine::Csf].eligible_animals, 10.0);
    }

    #[test]
    fn non_negative_inputs_give_non_negative_metrics() {
        let payload = json!({
            "population_cattle": 1234,
            "population_buffalo": 56,
            "population_sheep_goat": 789,
            "population_pig": 10,
            "coverage_percent": 70,
            "wastage_percent": 3,
            "buffer_percent": 12,
            "stock_brucellosis": 5,
        });
        for (vaccine, metric) in calculate_all(&payload) {
            for (name, value) in metric.fields() {
                assert!(value >= 0.0, "{vaccine} {name} = {value}");
            }
            assert_demand_identities(&metric);
        }
    }

    #[test]
    fn negative_inputs_propagate_unclamped() {
        let lsd = calculate_all(&json!({ "population_cattle": -10 }))[&Vaccine::Lsd];
        approx(lsd.eligible_animals, -10.0);
        assert!(lsd.annual_demand < 0.0);
    }

    #[test]
    fn alias_and_canonical_payloads_are_equivalent() {
        let short = calculate_all(&json!({ "population_cattle": 100, "stock_lsd": 4 }));
        let long = calculate_all(&json!({
            "population of cattle": 100,
            "Existing Vaccine Stock - LSD": 4,
        }));
        assert_eq!(short, long);
    }

    #[test]
    fn overflowing_inputs_store_zero_instead_of_infinity() {
        let metrics = calculate_all(&json!({
            "population_cattle": "1e308",
            "population_buffalo": "1e308",
        }));
        let fmd = metrics[&Vaccine::Fmd];
        assert!(fmd.annual_demand.is_infinite());

        let stored = fmd.rounded();
        for (name, value) in stored.fields() {
            assert!(value.is_finite(), "{name} = {value}");
        }
        assert_eq!(stored.annual_demand, 0.0);
        assert_eq!(stored.eligible_animals, 0.0);
    }

    // -- rounding --

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round2(0.0), 0.0);
    }
}
