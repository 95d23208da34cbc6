//! The closed set of vaccines a demand forecast is produced for.
//!
//! Adding a vaccine means adding a variant here, its eligible-animal rule in
//! [`crate::demand`] and its stock field in [`crate::fields::CanonicalKey`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::fields::CanonicalKey;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

pub const LABEL_FMD: &str = "FMD";
pub const LABEL_BRUCELLOSIS: &str = "Brucellosis";
pub const LABEL_PPR: &str = "PPR";
pub const LABEL_CSF: &str = "CSF";
pub const LABEL_LSD: &str = "LSD";

/// All vaccine labels, in forecast order.
pub const VALID_VACCINE_LABELS: &[&str] =
    &[LABEL_FMD, LABEL_BRUCELLOSIS, LABEL_PPR, LABEL_CSF, LABEL_LSD];

// ---------------------------------------------------------------------------
// Enum
// ---------------------------------------------------------------------------

/// A vaccine programme. Ordering follows declaration order, so maps keyed by
/// `Vaccine` iterate FMD, Brucellosis, PPR, CSF, LSD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Vaccine {
    /// Foot-and-mouth disease.
    #[serde(rename = "FMD")]
    Fmd,
    #[serde(rename = "Brucellosis")]
    Brucellosis,
    /// Peste des petits ruminants.
    #[serde(rename = "PPR")]
    Ppr,
    /// Classical swine fever.
    #[serde(rename = "CSF")]
    Csf,
    /// Lumpy skin disease.
    #[serde(rename = "LSD")]
    Lsd,
}

impl Vaccine {
    /// Every vaccine, in forecast order.
    pub const ALL: [Vaccine; 5] = [
        Vaccine::Fmd,
        Vaccine::Brucellosis,
        Vaccine::Ppr,
        Vaccine::Csf,
        Vaccine::Lsd,
    ];

    /// Convert from the stored/display label.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            LABEL_FMD => Ok(Self::Fmd),
            LABEL_BRUCELLOSIS => Ok(Self::Brucellosis),
            LABEL_PPR => Ok(Self::Ppr),
            LABEL_CSF => Ok(Self::Csf),
            LABEL_LSD => Ok(Self::Lsd),
            _ => Err(CoreError::InvalidArgument(format!(
                "Unknown vaccine '{s}'. Must be one of: {}",
                VALID_VACCINE_LABELS.join(", ")
            ))),
        }
    }

    /// The stored/display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fmd => LABEL_FMD,
            Self::Brucellosis => LABEL_BRUCELLOSIS,
            Self::Ppr => LABEL_PPR,
            Self::Csf => LABEL_CSF,
            Self::Lsd => LABEL_LSD,
        }
    }

    /// Doses administered per animal per year.
    pub fn doses_per_year(&self) -> f64 {
        match self {
            Self::Fmd => 2.0,
            Self::Brucellosis | Self::Ppr | Self::Csf | Self::Lsd => 1.0,
        }
    }

    /// The submission field holding the existing stock of this vaccine.
    pub fn stock_key(&self) -> CanonicalKey {
        match self {
            Self::Fmd => CanonicalKey::StockFmd,
            Self::Brucellosis => CanonicalKey::StockBrucellosis,
            Self::Ppr => CanonicalKey::StockPpr,
            Self::Csf => CanonicalKey::StockCsf,
            Self::Lsd => CanonicalKey::StockLsd,
        }
    }
}

impl fmt::Display for Vaccine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vaccine {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_value(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn labels_resolve_to_variants() {
        for vaccine in Vaccine::ALL {
            assert_eq!(Vaccine::from_str_value(vaccine.as_str()).unwrap(), vaccine);
        }
    }

    #[test]
    fn unknown_label_is_invalid_argument() {
        assert_matches!(
            Vaccine::from_str_value("Rabies"),
            Err(CoreError::InvalidArgument(msg)) if msg.contains("Rabies")
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert!(Vaccine::from_str_value("fmd").is_err());
    }

    #[test]
    fn only_fmd_is_biannual() {
        assert_eq!(Vaccine::Fmd.doses_per_year(), 2.0);
        for vaccine in &Vaccine::ALL[1..] {
            assert_eq!(vaccine.doses_per_year(), 1.0);
        }
    }

    #[test]
    fn stock_keys_follow_lowercase_label() {
        for vaccine in Vaccine::ALL {
            let expected = format!("stock_{}", vaccine.as_str().to_lowercase());
            assert_eq!(vaccine.stock_key().as_str(), expected);
        }
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_value(Vaccine::Brucellosis).unwrap();
        assert_eq!(json, "Brucellosis");
        let back: Vaccine = serde_json::from_value(serde_json::json!("PPR")).unwrap();
        assert_eq!(back, Vaccine::Ppr);
    }

    #[test]
    fn ordering_matches_forecast_order() {
        let mut shuffled = vec![Vaccine::Lsd, Vaccine::Fmd, Vaccine::Csf, Vaccine::Ppr, Vaccine::Brucellosis];
        shuffled.sort();
        assert_eq!(shuffled, Vaccine::ALL.to_vec());
    }
}
