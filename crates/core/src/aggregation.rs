//! Region-level aggregation of submission payloads.
//!
//! A region (state) may hold any number of submissions. Demand metrics are
//! summed field by field, one accumulator per vaccine, and raw population
//! counts are summed separately for the livestock summary view.

use serde::Serialize;

use crate::demand::{calculate_all, round2, Populations, VaccineMetric, VaccineMetrics};
use crate::fields::FieldSource;
use crate::vaccine::Vaccine;

/// All-zero metrics for every vaccine.
pub fn zero_metrics() -> VaccineMetrics {
    Vaccine::ALL
        .into_iter()
        .map(|vaccine| (vaccine, VaccineMetric::default()))
        .collect()
}

/// Sum the per-vaccine metrics of every submission.
///
/// Every vaccine is always present in the result; a region with no
/// submissions aggregates to all-zero metrics.
pub fn aggregate<'a, P, I>(submissions: I) -> VaccineMetrics
where
    P: FieldSource + ?Sized + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut sums = zero_metrics();
    for payload in submissions {
        for (vaccine, metric) in calculate_all(payload) {
            *sums.entry(vaccine).or_default() += metric;
        }
    }
    sums
}

/// Population totals for one region, rounded to two decimals for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PopulationTotals {
    pub cattle: f64,
    pub buffalo: f64,
    pub sheep_goat: f64,
    pub pig: f64,
    pub total_eligible_animals: f64,
}

/// Sum the raw population counts of every submission.
///
/// Counts are resolved with the same alias rules as the demand calculation.
/// The total is taken before rounding.
pub fn summarize_populations<'a, P, I>(submissions: I) -> PopulationTotals
where
    P: FieldSource + ?Sized + 'a,
    I: IntoIterator<Item = &'a P>,
{
    let mut sums = Populations::default();
    for payload in submissions {
        sums += Populations::from_payload(payload);
    }

    PopulationTotals {
        cattle: round2(sums.cattle),
        buffalo: round2(sums.buffalo),
        sheep_goat: round2(sums.sheep_goat),
        pig: round2(sums.pig),
        total_eligible_animals: round2(sums.total()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn assert_metrics_close(a: &VaccineMetrics, b: &VaccineMetrics) {
        assert_eq!(a.len(), b.len());
        for (vaccine, left) in a {
            let right = &b[vaccine];
            for ((name, x), (_, y)) in left.fields().into_iter().zip(right.fields()) {
                assert!((x - y).abs() < 1e-9, "{vaccine} {name}: {x} != {y}");
            }
        }
    }

    #[test]
    fn no_submissions_aggregate_to_zero_for_every_vaccine() {
        let none: Vec<Value> = Vec::new();
        let sums = aggregate(&none);
        assert_eq!(sums.len(), Vaccine::ALL.len());
        for vaccine in Vaccine::ALL {
            assert_eq!(sums[&vaccine], VaccineMetric::default());
        }
    }

    #[test]
    fn single_submission_matches_calculator() {
        let subs = vec![json!({ "population_cattle": 100, "stock_fmd": 3 })];
        assert_eq!(aggregate(&subs), calculate_all(&subs[0]));
    }

    #[test]
    fn aggregation_is_additive() {
        let a = json!({ "population_cattle": 120, "population_pig": 8, "coverage_percent": 80 });
        let b = json!({ "population of Sheep + Goat": "340", "Buffer %": "5", "stock_ppr": 20 });

        let together = aggregate([&a, &b]);

        let mut separate = aggregate([&a]);
        for (vaccine, metric) in aggregate([&b]) {
            *separate.get_mut(&vaccine).unwrap() += metric;
        }

        assert_metrics_close(&together, &separate);
    }

    #[test]
    fn submissions_keep_their_own_parameters() {
        // Each submission's percentages apply only to its own populations.
        let full = json!({ "population_cattle": 10, "coverage_percent": 100, "wastage_percent": 0, "buffer_percent": 0 });
        let defaults = json!({ "population_cattle": 10 });

        let sums = aggregate([&full, &defaults]);
        let expected = calculate_all(&full)[&Vaccine::Lsd].annual_demand
            + calculate_all(&defaults)[&Vaccine::Lsd].annual_demand;
        assert!((sums[&Vaccine::Lsd].annual_demand - expected).abs() < 1e-9);
    }

    #[test]
    fn summary_sums_and_rounds_populations() {
        let subs = vec![
            json!({ "population_cattle": 10.004, "population_pig": "1.5" }),
            json!({ "population of cattle": 5, "population of Buffalo": 2.333, "population_sheep_goat": 7 }),
        ];
        let totals = summarize_populations(&subs);

        assert_eq!(totals.cattle, 15.0);
        assert_eq!(totals.buffalo, 2.33);
        assert_eq!(totals.sheep_goat, 7.0);
        assert_eq!(totals.pig, 1.5);
        assert_eq!(totals.total_eligible_animals, 25.84);
    }

    #[test]
    fn summary_of_no_submissions_is_zero() {
        let none: Vec<Value> = Vec::new();
        assert_eq!(summarize_populations(&none), PopulationTotals::default());
    }
}
