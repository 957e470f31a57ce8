//! Leeway coefficients per search-object type
//!
//! Every drifting object class gets a coefficient set describing how it
//! responds to wind. Two interchangeable models:
//!
//! - `Percentage`: leeway speed is a percentage band of wind speed, with a
//!   fixed divergence half-angle. Used for rafts, small craft, persons in
//!   the water.
//! - `Regression`: downwind (DWL) and crosswind (CWL) leeway components as
//!   linear fits in wind speed. Used for vessel classes with published
//!   regression studies.
//!
//! The built-in table reproduces IAMSAR Vol. II Appendix N values. Callers
//! may merge their own entries over it from JSON; lookups never fail, an
//! unknown key resolves to the documented fallback set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coefficient set for one object class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum LeewayCoefficients {
    /// Leeway speed as a percentage band of wind speed.
    Percentage {
        /// Lower bound of the leeway band, percent of wind speed
        min_pct: f64,
        /// Upper bound of the leeway band, percent of wind speed
        max_pct: f64,
        /// Divergence half-angle off downwind, degrees
        divergence_deg: f64,
    },
    /// Downwind/crosswind linear regression in wind speed (knots).
    Regression {
        /// Downwind leeway slope, kn per kn of wind
        dwl_slope: f64,
        /// Downwind leeway intercept, kn
        dwl_intercept: f64,
        /// Crosswind leeway slope, kn per kn of wind
        cwl_slope: f64,
        /// Crosswind leeway intercept, kn
        cwl_intercept: f64,
    },
}

impl LeewayCoefficients {
    /// Divergence half-angle in degrees at the given wind speed.
    ///
    /// For the percentage model this is the tabulated constant. For the
    /// regression model it is the angle the crosswind component opens off
    /// downwind, `atan2(|CWL|, DWL)`, which varies with wind speed.
    pub fn divergence_deg(&self, wind_speed_kn: f64) -> f64 {
        match *self {
            LeewayCoefficients::Percentage { divergence_deg, .. } => divergence_deg,
            LeewayCoefficients::Regression {
                dwl_slope,
                dwl_intercept,
                cwl_slope,
                cwl_intercept,
            } => {
                let dwl = dwl_slope * wind_speed_kn + dwl_intercept;
                let cwl = cwl_slope * wind_speed_kn + cwl_intercept;
                cwl.abs().atan2(dwl).to_degrees()
            }
        }
    }
}

// Built-in coefficients, IAMSAR Vol. II Appendix N.
// Percentage rows: (min %, max %, divergence deg).
// Regression rows: (DWL slope, DWL intercept, CWL slope, CWL intercept),
// knots per knot of wind / knots.
const BUILTIN: [(&str, LeewayCoefficients); 21] = [
    ("person_in_water",   pct(1.0, 2.0, 30.0)),
    ("liferaft_4p",       pct(3.0, 5.2, 35.0)),
    ("liferaft_6p",       pct(2.9, 4.6, 30.0)),
    ("liferaft_10p",      pct(2.7, 4.3, 28.0)),
    ("liferaft_15p",      pct(2.5, 4.0, 25.0)),
    ("liferaft_20p",      pct(2.3, 3.8, 22.0)),
    ("liferaft_25p",      pct(2.2, 3.6, 20.0)),
    ("dinghy_flat",       pct(3.2, 5.5, 40.0)),
    ("dinghy_keel",       pct(2.6, 4.4, 30.0)),
    ("sea_kayak",         pct(1.0, 1.8, 15.0)),
    ("surfboard",         pct(1.5, 2.5, 15.0)),
    ("debris",            pct(1.0, 1.5, 10.0)),
    ("fallback",          pct(3.0, 5.0, 35.0)),
    ("sailboat_small",    reg(0.040, 0.0, 0.020, 0.0)),
    ("sailboat_medium",   reg(0.035, 0.1, 0.016, 0.05)),
    ("sailboat_large",    reg(0.030, 0.1, 0.012, 0.05)),
    ("powerboat_small",   reg(0.060, 0.0, 0.020, 0.0)),
    ("powerboat_cabin",   reg(0.069, -0.08, 0.025, 0.0)),
    ("fishing_vessel",    reg(0.042, 0.0, 0.017, 0.0)),
    ("sport_fisher",      reg(0.048, 0.1, 0.019, 0.0)),
    ("coastal_freighter", reg(0.028, 0.0, 0.011, 0.0)),
];

const fn pct(min_pct: f64, max_pct: f64, divergence_deg: f64) -> LeewayCoefficients {
    LeewayCoefficients::Percentage {
        min_pct,
        max_pct,
        divergence_deg,
    }
}

const fn reg(
    dwl_slope: f64,
    dwl_intercept: f64,
    cwl_slope: f64,
    cwl_intercept: f64,
) -> LeewayCoefficients {
    LeewayCoefficients::Regression {
        dwl_slope,
        dwl_intercept,
        cwl_slope,
        cwl_intercept,
    }
}

/// Object-type to coefficient-set table.
///
/// Read-only after construction; inject one instance into the datum engine
/// rather than reaching for a global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeewayTable {
    entries: BTreeMap<String, LeewayCoefficients>,
}

impl LeewayTable {
    /// Coefficients used for object types the table does not know.
    pub const FALLBACK: LeewayCoefficients = pct(3.0, 5.0, 35.0);

    /// Merge caller-supplied entries (a JSON object keyed by object type)
    /// over the built-in defaults. Supplied keys replace built-in ones.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let overrides: BTreeMap<String, LeewayCoefficients> = serde_json::from_str(json)?;
        let mut table = Self::default();
        log::debug!("leeway table: merging {} override entries", overrides.len());
        table.entries.extend(overrides);
        Ok(table)
    }

    /// Look up an object type, falling back to [`Self::FALLBACK`] for
    /// unknown keys. Never fails.
    pub fn resolve(&self, object_key: &str) -> LeewayCoefficients {
        match self.entries.get(object_key) {
            Some(coeffs) => *coeffs,
            None => {
                log::debug!("{object_key}: unknown object type, using fallback coefficients");
                Self::FALLBACK
            }
        }
    }

    /// Exact lookup without the fallback.
    pub fn get(&self, object_key: &str) -> Option<&LeewayCoefficients> {
        self.entries.get(object_key)
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, object_key: impl Into<String>, coeffs: LeewayCoefficients) {
        self.entries.insert(object_key.into(), coeffs);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known object-type keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for LeewayTable {
    fn default() -> Self {
        LeewayTable {
            entries: BUILTIN
                .iter()
                .map(|(key, coeffs)| (key.to_string(), *coeffs))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_complete() {
        let table = LeewayTable::default();
        assert_eq!(table.len(), 21);
        assert!(table.get("person_in_water").is_some());
        assert!(table.get("coastal_freighter").is_some());
        assert!(table.get("fallback").is_some());
    }

    #[test]
    fn test_unknown_key_resolves_to_fallback() {
        let table = LeewayTable::default();
        let coeffs = table.resolve("submarine");
        assert_eq!(coeffs, LeewayTable::FALLBACK);
        match coeffs {
            LeewayCoefficients::Percentage {
                min_pct,
                max_pct,
                divergence_deg,
            } => {
                assert_eq!(min_pct, 3.0);
                assert_eq!(max_pct, 5.0);
                assert_eq!(divergence_deg, 35.0);
            }
            _ => panic!("fallback must be the percentage model"),
        }
    }

    #[test]
    fn test_fallback_entry_matches_fallback_const() {
        let table = LeewayTable::default();
        assert_eq!(*table.get("fallback").unwrap(), LeewayTable::FALLBACK);
    }

    #[test]
    fn test_divergence_for_regression_varies_with_wind() {
        let coeffs = LeewayTable::default().resolve("sailboat_small");
        // DWL = 0.4, CWL = 0.2 at 10 kn
        let div = coeffs.divergence_deg(10.0);
        assert!((div - 0.2_f64.atan2(0.4).to_degrees()).abs() < 1e-9);
        // slope-only fit keeps the same angle at any wind speed
        assert!((coeffs.divergence_deg(20.0) - div).abs() < 1e-9);
        // intercepts bend the angle
        let cabin = LeewayTable::default().resolve("powerboat_cabin");
        assert!((cabin.divergence_deg(10.0) - cabin.divergence_deg(20.0)).abs() > 1e-3);
    }

    #[test]
    fn test_from_json_merges_over_defaults() {
        let json = r#"{
            "person_in_water": { "model": "percentage", "min_pct": 1.1, "max_pct": 2.2, "divergence_deg": 33.0 },
            "ice_floe": { "model": "percentage", "min_pct": 0.5, "max_pct": 1.0, "divergence_deg": 5.0 }
        }"#;
        let table = LeewayTable::from_json(json).unwrap();
        assert_eq!(table.len(), 22);
        match table.resolve("person_in_water") {
            LeewayCoefficients::Percentage { max_pct, .. } => assert_eq!(max_pct, 2.2),
            _ => panic!("override lost"),
        }
        assert!(table.get("ice_floe").is_some());
        // untouched entries survive the merge
        assert!(table.get("liferaft_10p").is_some());
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(LeewayTable::from_json("not json").is_err());
        assert!(LeewayTable::from_json(r#"{ "x": { "model": "voodoo" } }"#).is_err());
    }

    #[test]
    fn test_coefficients_serde_tagging() {
        let coeffs = LeewayTable::default().resolve("fishing_vessel");
        let json = serde_json::to_string(&coeffs).unwrap();
        assert!(json.contains(r#""model":"regression""#), "got {json}");
        let back: LeewayCoefficients = serde_json::from_str(&json).unwrap();
        assert_eq!(coeffs, back);
    }
}
