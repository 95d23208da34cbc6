//! Field resolution for submission payloads.
//!
//! Submissions have been captured by several generations of data-entry
//! forms, so the same figure may arrive under a short snake_case key
//! (`population_cattle`) or a long-form label (`population of cattle`).
//! [`CanonicalKey`] names each figure once and carries its legacy aliases;
//! the resolver tries the canonical key first, then each alias in order, and
//! takes the first non-blank value.
//!
//! Payload access goes through [`FieldSource`], so the resolver works the
//! same for a raw JSON object, a `serde_json::Value` or an in-memory map.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Canonical keys
// ---------------------------------------------------------------------------

/// A figure a submission may report, independent of the key spelling used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalKey {
    PopulationCattle,
    PopulationBuffalo,
    PopulationSheepGoat,
    PopulationPig,
    /// Reported but not used by the calculator; new births are derived per
    /// vaccine from eligible animals.
    EstimatedAnnualNewBirth,
    CoveragePercent,
    WastagePercent,
    BufferPercent,
    StockFmd,
    StockBrucellosis,
    StockPpr,
    StockCsf,
    StockLsd,
}

impl CanonicalKey {
    pub const ALL: [CanonicalKey; 13] = [
        CanonicalKey::PopulationCattle,
        CanonicalKey::PopulationBuffalo,
        CanonicalKey::PopulationSheepGoat,
        CanonicalKey::PopulationPig,
        CanonicalKey::EstimatedAnnualNewBirth,
        CanonicalKey::CoveragePercent,
        CanonicalKey::WastagePercent,
        CanonicalKey::BufferPercent,
        CanonicalKey::StockFmd,
        CanonicalKey::StockBrucellosis,
        CanonicalKey::StockPpr,
        CanonicalKey::StockCsf,
        CanonicalKey::StockLsd,
    ];

    /// The short key used by the current submission form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PopulationCattle => "population_cattle",
            Self::PopulationBuffalo => "population_buffalo",
            Self::PopulationSheepGoat => "population_sheep_goat",
            Self::PopulationPig => "population_pig",
            Self::EstimatedAnnualNewBirth => "estimated_annual_new_birth",
            Self::CoveragePercent => "coverage_percent",
            Self::WastagePercent => "wastage_percent",
            Self::BufferPercent => "buffer_percent",
            Self::StockFmd => "stock_fmd",
            Self::StockBrucellosis => "stock_brucellosis",
            Self::StockPpr => "stock_ppr",
            Self::StockCsf => "stock_csf",
            Self::StockLsd => "stock_lsd",
        }
    }

    /// Long-form labels from imported documents, tried in order after the
    /// canonical key. Matching is exact: case and spacing are significant.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::PopulationCattle => &["population of cattle"],
            Self::PopulationBuffalo => &["population of Buffalo"],
            Self::PopulationSheepGoat => &["population of Sheep + Goat"],
            Self::PopulationPig => &["population of Pig"],
            Self::EstimatedAnnualNewBirth => {
                &["Estimated Annual New Birth (all species combined)"]
            }
            Self::CoveragePercent => &["coverage % (target of vaccine coverage)"],
            Self::WastagePercent => &["Wastage % (wastage during operation and in-transit)"],
            // The trailing-space spelling came from a spreadsheet header.
            Self::BufferPercent => &["Buffer % ", "Buffer %"],
            Self::StockFmd => &["Existing Vaccine Stock - FMD"],
            Self::StockBrucellosis => &["Existing Vaccine Stock - Brucellosis"],
            Self::StockPpr => &["Existing Vaccine Stock - PPR"],
            Self::StockCsf => &["Existing Vaccine Stock - CSF"],
            Self::StockLsd => &["Existing Vaccine Stock - LSD"],
        }
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payload access
// ---------------------------------------------------------------------------

/// Read access to a flat, string-keyed submission payload.
pub trait FieldSource {
    /// Look up the raw value stored under `key`, exactly as spelled.
    fn field(&self, key: &str) -> Option<&Value>;
}

impl FieldSource for Map<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Non-object values expose no fields.
impl FieldSource for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl<S: BuildHasher> FieldSource for HashMap<String, Value, S> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl FieldSource for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A field was present but could not be coerced to a number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("Field '{key}' is not numeric: {raw}")]
    Unparsable { key: CanonicalKey, raw: String },
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Whether a value counts as supplied.
///
/// `null` and blank strings are absent. Numbers and booleans are always
/// present; arrays and objects are present when non-empty.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Resolve the raw value for `key`: canonical spelling first, then each
/// alias in declared order. Returns the first present value.
pub fn resolve_raw<P>(payload: &P, key: CanonicalKey) -> Option<&Value>
where
    P: FieldSource + ?Sized,
{
    std::iter::once(key.as_str())
        .chain(key.aliases().iter().copied())
        .filter_map(|candidate| payload.field(candidate))
        .find(|value| is_present(value))
}

/// Coerce a present value to a finite `f64`.
///
/// Strings are trimmed and parsed strictly; booleans, arrays, objects and
/// non-finite results are rejected.
pub fn parse_numeric(key: CanonicalKey, value: &Value) -> Result<f64, FieldError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| FieldError::Unparsable {
            key,
            raw: value.to_string(),
        })
}

/// The single lenient coercion point: absent yields `default` silently,
/// unparsable yields `default` with a warning.
pub fn parse_numeric_or_default(key: CanonicalKey, value: Option<&Value>, default: f64) -> f64 {
    match value.map(|v| parse_numeric(key, v)) {
        None => default,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            tracing::warn!(field = %key, error = %e, default, "Unparsable numeric field, using default");
            default
        }
    }
}

/// Resolve `key` as a number. `Ok(None)` means the field is absent or blank.
pub fn try_resolve_float<P>(payload: &P, key: CanonicalKey) -> Result<Option<f64>, FieldError>
where
    P: FieldSource + ?Sized,
{
    resolve_raw(payload, key)
        .map(|value| parse_numeric(key, value))
        .transpose()
}

/// Resolve `key` as a number, falling back to `default` when the field is
/// absent, blank or unparsable. Never fails.
pub fn resolve_float<P>(payload: &P, key: CanonicalKey, default: f64) -> f64
where
    P: FieldSource + ?Sized,
{
    parse_numeric_or_default(key, resolve_raw(payload, key), default)
}

/// Resolve an optional percentage override (submitted on a 0-100 scale).
///
/// Returns `None` when the field is absent or unparsable so the caller's
/// documented default applies.
pub fn resolve_percent<P>(payload: &P, key: CanonicalKey) -> Option<f64>
where
    P: FieldSource + ?Sized,
{
    match try_resolve_float(payload, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(field = %key, error = %e, "Unparsable percentage override, using default");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
