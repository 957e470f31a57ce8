//! Datum Engine
//!
//! Projects a last known position forward through wind and current to the
//! set of datum points a search is planned around, and sizes the search
//! radius from the drift error budget.
//!
//! # Features
//!
//! - Center datum from the resultant drift vector
//! - Left/right datums recomputed down the divergence branches, never
//!   rotated from the center displacement
//! - Optional min/max datums bounding single-observation uncertainty
//! - Search radius from initial, position, and divergence error terms
//!   with a fixed 1.5 safety multiplier
//!
//! # Example
//!
//! ```rust,ignore
//! use driftum_core::datum::{compute_datum_set, DriftScenario, DatumOptions};
//! use driftum_core::geo::GeoPosition;
//! use driftum_core::leeway::{LeewayTable, WeatherObservation};
//!
//! let scenario = DriftScenario {
//!     lkp: GeoPosition::new(60.0, 30.0)?,
//!     weather: WeatherObservation::new(45.0, 11.66, 90.0, 0.97)?,
//!     object_key: "liferaft_6p".into(),
//!     elapsed_hours: 2.0,
//!     options: DatumOptions::default(),
//! };
//! let datums = compute_datum_set(&scenario, &LeewayTable::default())?;
//! println!("search radius {:.2} nm", datums.search_radius_nm);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{check_angle, check_non_negative, EngineError};
use crate::geo::{destination_point, GeoPosition};
use crate::leeway::{
    drift_vector_branch, drift_vector_scaled, DriftBranch, DriftVector, LeewayCoefficients,
    LeewayTable, WeatherObservation,
};

/// Fixed multiplier applied to the total drift error when sizing the
/// search radius.
pub const SAFETY_FACTOR: f64 = 1.5;

/// Default initial position error at the LKP, nautical miles.
pub const DEFAULT_INITIAL_ERROR_NM: f64 = 0.1;

// Drift error grows at 10% of distance drifted.
const POSITION_ERROR_FRACTION: f64 = 0.1;

// Single-observation uncertainty bounds on the leeway response.
const MIN_DRIFT_SCALE: f64 = 0.7;
const MAX_DRIFT_SCALE: f64 = 1.3;

/// Role of one datum point within a [`DatumSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatumLabel {
    /// Last known position, unchanged
    Lkp,
    /// Resultant drift projection
    Center,
    /// Left divergence branch projection
    Left,
    /// Right divergence branch projection
    Right,
    /// Leeway response scaled down (x0.7)
    Min,
    /// Leeway response scaled up (x1.3)
    Max,
}

impl DatumLabel {
    /// Relative weight of this datum when distributing search effort.
    pub fn confidence(&self) -> f64 {
        match self {
            DatumLabel::Lkp => 1.0,
            DatumLabel::Center => 0.5,
            DatumLabel::Left | DatumLabel::Right => 0.25,
            DatumLabel::Min | DatumLabel::Max => 0.15,
        }
    }
}

/// One projected search datum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatumPoint {
    pub label: DatumLabel,
    pub position: GeoPosition,
    /// Relative weight, from [`DatumLabel::confidence`]
    pub confidence: f64,
}

impl DatumPoint {
    fn new(label: DatumLabel, position: GeoPosition) -> Self {
        DatumPoint {
            label,
            position,
            confidence: label.confidence(),
        }
    }
}

/// Tuning knobs for datum computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatumOptions {
    /// Also emit Min/Max datums (leeway response x0.7 / x1.3)
    pub include_min_max: bool,
    /// Position error at the LKP, nautical miles
    pub initial_error_nm: f64,
    /// Replace the object's divergence angle in branch computation
    /// (percentage model) and in the radius error budget
    pub divergence_override_deg: Option<f64>,
}

impl Default for DatumOptions {
    fn default() -> Self {
        DatumOptions {
            include_min_max: false,
            initial_error_nm: DEFAULT_INITIAL_ERROR_NM,
            divergence_override_deg: None,
        }
    }
}

/// Everything the engine needs to project one drift case.
///
/// Deterministic: the engine never reads a clock, `elapsed_hours` is the
/// only notion of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftScenario {
    /// Last known position
    pub lkp: GeoPosition,
    /// Wind/current sample (already vector-averaged if from a schedule)
    pub weather: WeatherObservation,
    /// Search-object type, resolved through the injected [`LeewayTable`]
    pub object_key: String,
    /// Hours since the LKP was established
    pub elapsed_hours: f64,
    #[serde(default)]
    pub options: DatumOptions,
}

/// Datum points plus the drift summary and search radius derived from one
/// scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatumSet {
    /// LKP, Center, Left, Right, and optionally Min/Max
    pub points: Vec<DatumPoint>,
    /// Resultant center drift vector
    pub drift: DriftVector,
    /// Distance the center datum moved, nautical miles
    pub drift_distance_nm: f64,
    /// Recommended search radius around the datum, nautical miles
    pub search_radius_nm: f64,
}

impl DatumSet {
    /// The datum carrying the given label, if present.
    pub fn point(&self, label: DatumLabel) -> Option<&DatumPoint> {
        self.points.iter().find(|p| p.label == label)
    }

    /// Positions of all datums, in emission order.
    pub fn positions(&self) -> Vec<GeoPosition> {
        self.points.iter().map(|p| p.position).collect()
    }
}

/// Compute the datum set for one drift scenario.
///
/// # Arguments
///
/// * `scenario` - LKP, weather, object type, and elapsed time
/// * `table` - leeway coefficient table; unknown object keys fall back to
///   [`LeewayTable::FALLBACK`]
///
/// # Returns
///
/// The projected datum points, the resultant drift vector, and the search
/// radius, or an error for non-finite/negative inputs.
pub fn compute_datum_set(
    scenario: &DriftScenario,
    table: &LeewayTable,
) -> Result<DatumSet, EngineError> {
    scenario.lkp.validate()?;
    scenario.weather.validate()?;
    if !scenario.elapsed_hours.is_finite() || scenario.elapsed_hours < 0.0 {
        return Err(EngineError::InvalidElapsed(scenario.elapsed_hours));
    }
    check_non_negative(scenario.options.initial_error_nm, "initial_error_nm")?;
    if let Some(d) = scenario.options.divergence_override_deg {
        check_angle(d, "divergence_override_deg")?;
    }

    // Percentage-model branches perturb the wind direction by the
    // divergence angle, so an override rewrites the coefficient set.
    // Regression branches are driven by the signed CWL term instead; there
    // the override only enters the radius budget below.
    let coeffs = match (
        table.resolve(&scenario.object_key),
        scenario.options.divergence_override_deg,
    ) {
        (
            LeewayCoefficients::Percentage {
                min_pct, max_pct, ..
            },
            Some(divergence_deg),
        ) => LeewayCoefficients::Percentage {
            min_pct,
            max_pct,
            divergence_deg,
        },
        (c, _) => c,
    };

    let weather = &scenario.weather;
    let elapsed = scenario.elapsed_hours;

    let drift = drift_vector_branch(weather, &coeffs, DriftBranch::Center);
    let left = drift_vector_branch(weather, &coeffs, DriftBranch::Left);
    let right = drift_vector_branch(weather, &coeffs, DriftBranch::Right);
    let drift_distance_nm = drift.speed_kn * elapsed;

    let project = |v: &DriftVector| -> GeoPosition {
        destination_point(&scenario.lkp, v.speed_kn * elapsed, v.direction_deg)
    };

    let mut points = vec![
        DatumPoint::new(DatumLabel::Lkp, scenario.lkp),
        DatumPoint::new(DatumLabel::Center, project(&drift)),
        DatumPoint::new(DatumLabel::Left, project(&left)),
        DatumPoint::new(DatumLabel::Right, project(&right)),
    ];
    if scenario.options.include_min_max {
        let min = drift_vector_scaled(weather, &coeffs, DriftBranch::Center, MIN_DRIFT_SCALE);
        let max = drift_vector_scaled(weather, &coeffs, DriftBranch::Center, MAX_DRIFT_SCALE);
        points.push(DatumPoint::new(DatumLabel::Min, project(&min)));
        points.push(DatumPoint::new(DatumLabel::Max, project(&max)));
    }

    let divergence_deg = scenario
        .options
        .divergence_override_deg
        .unwrap_or_else(|| coeffs.divergence_deg(weather.wind_speed_kn));

    let position_error = POSITION_ERROR_FRACTION * drift_distance_nm;
    let divergence_error = drift_distance_nm * divergence_deg.to_radians().sin();
    let total_error = (scenario.options.initial_error_nm.powi(2)
        + position_error.powi(2)
        + divergence_error.powi(2))
    .sqrt();
    let search_radius_nm = total_error * SAFETY_FACTOR;

    log::debug!(
        "{}: drift {:.2} kn at {:.1} deg, distance {:.2} nm, radius {:.2} nm",
        scenario.object_key,
        drift.speed_kn,
        drift.direction_deg,
        drift_distance_nm,
        search_radius_nm
    );

    Ok(DatumSet {
        points,
        drift,
        drift_distance_nm,
        search_radius_nm,
    })
}
