//! Search-Effort Estimator
//!
//! Coverage, probability of detection, and track-spacing arithmetic over
//! a synthesized search area. Follows the classic exponential detection
//! model: POD = 1 - e^(-coverage), with coverage as total swept area over
//! search area.
//!
//! # Example
//!
//! ```rust,ignore
//! use driftum_core::effort::{EffortEstimate, SearchUnit};
//!
//! let units = vec![SearchUnit::new("RHIB-1", 10.0, 6.0, 2.0)?];
//! let estimate = EffortEstimate::evaluate(&units, 400.0, 4.0)?;
//! println!("POD {:.0}%", estimate.pod * 100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, check_speed, EngineError};

/// POD never reports above this, however much effort is planned.
pub const POD_CEILING: f64 = 0.99;

// Fraction of the theoretical sweep rate a unit sustains in practice.
const SEARCH_EFFICIENCY: f64 = 0.7;

// Optimal spacing is the POD-scaled detection range times this.
const TRACK_SPACING_FACTOR: f64 = 1.5;

// POD tier thresholds to effective-detection-range scale.
const RANGE_SCALE_TIERS: [(f64, f64); 3] = [(0.9, 0.9), (0.7, 0.7), (0.5, 0.5)];
const RANGE_SCALE_FLOOR: f64 = 0.3;

/// One search-and-rescue unit committed to an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchUnit {
    pub id: String,
    /// Sustained search speed, knots
    pub search_speed_kn: f64,
    /// Time on task, hours
    pub endurance_h: f64,
    /// Effective sweep width for the object sought, nm
    pub sweep_width_nm: f64,
}

impl SearchUnit {
    /// Create a validated unit; speed, endurance, and sweep width must be
    /// finite and non-negative.
    pub fn new(
        id: impl Into<String>,
        search_speed_kn: f64,
        endurance_h: f64,
        sweep_width_nm: f64,
    ) -> Result<Self, EngineError> {
        let unit = SearchUnit {
            id: id.into(),
            search_speed_kn,
            endurance_h,
            sweep_width_nm,
        };
        unit.validate()?;
        Ok(unit)
    }

    /// Re-check invariants on a unit built directly.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_speed(self.search_speed_kn)?;
        check_non_negative(self.endurance_h, "endurance_h")?;
        check_non_negative(self.sweep_width_nm, "sweep_width_nm")?;
        Ok(())
    }

    /// Area this unit sweeps over its endurance, nm^2.
    pub fn effort_nm2(&self) -> f64 {
        self.sweep_width_nm * self.search_speed_kn * self.endurance_h
    }
}

/// Total swept area over search area. Zero for an empty unit list or a
/// non-positive area; an empty tasking is not an error.
pub fn coverage_factor(units: &[SearchUnit], area_nm2: f64) -> f64 {
    if units.is_empty() || area_nm2 <= 0.0 {
        return 0.0;
    }
    units.iter().map(SearchUnit::effort_nm2).sum::<f64>() / area_nm2
}

/// Probability of detection for one search at the given coverage,
/// clamped to [0, [`POD_CEILING`]].
pub fn pod(coverage: f64) -> f64 {
    (1.0 - (-coverage).exp()).clamp(0.0, POD_CEILING)
}

/// Cumulative POD over successive independent passes:
/// p <- p + p_i * (1 - p). Non-decreasing, never reaches 1.
pub fn cumulative_pod(pass_pods: &[f64]) -> f64 {
    pass_pods
        .iter()
        .fold(0.0, |acc, p| acc + p * (1.0 - acc))
}

/// Hours to sweep the area once at the nominal speed and sweep width,
/// assuming [`SEARCH_EFFICIENCY`]. Never below one hour; a non-positive
/// sweep rate floors to the minimum rather than dividing to infinity.
pub fn recommended_search_time(
    area_nm2: f64,
    nominal_speed_kn: f64,
    sweep_width_nm: f64,
) -> f64 {
    let sweep_rate = SEARCH_EFFICIENCY * nominal_speed_kn * sweep_width_nm;
    if sweep_rate > 0.0 && area_nm2 > 0.0 {
        (area_nm2 / sweep_rate).max(1.0)
    } else {
        1.0
    }
}

/// Track spacing that balances coverage against the POD already achieved:
/// the detection range is scaled down by POD tier, then spread by
/// [`TRACK_SPACING_FACTOR`].
pub fn optimal_track_spacing(detection_range_nm: f64, pod: f64) -> f64 {
    let scale = RANGE_SCALE_TIERS
        .iter()
        .find(|(threshold, _)| pod >= *threshold)
        .map(|(_, scale)| *scale)
        .unwrap_or(RANGE_SCALE_FLOOR);
    detection_range_nm * scale * TRACK_SPACING_FACTOR
}

/// Per-unit contribution to the swept area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEffort {
    pub id: String,
    /// sweep width x speed x endurance, nm^2
    pub effort_nm2: f64,
}

/// One evaluated effort plan over an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffortEstimate {
    pub coverage_factor: f64,
    pub pod: f64,
    /// Hours for one sweep at the fleet-average speed and sweep width
    pub recommended_time_h: f64,
    /// Spacing suggestion for the next pass, nm
    pub optimal_spacing_nm: f64,
    pub unit_efforts: Vec<UnitEffort>,
}

impl EffortEstimate {
    /// Evaluate a tasking of `units` against an area.
    ///
    /// # Arguments
    ///
    /// * `units` - committed units; an empty list is a valid plan with
    ///   zero coverage
    /// * `area_nm2` - search area size
    /// * `detection_range_nm` - sensor detection range for the spacing
    ///   suggestion
    pub fn evaluate(
        units: &[SearchUnit],
        area_nm2: f64,
        detection_range_nm: f64,
    ) -> Result<Self, EngineError> {
        for unit in units {
            unit.validate()?;
        }
        check_non_negative(area_nm2, "area_nm2")?;
        check_non_negative(detection_range_nm, "detection_range_nm")?;

        let coverage = coverage_factor(units, area_nm2);
        let pod = pod(coverage);

        let n = units.len() as f64;
        let (mean_speed, mean_sweep) = if units.is_empty() {
            (0.0, 0.0)
        } else {
            (
                units.iter().map(|u| u.search_speed_kn).sum::<f64>() / n,
                units.iter().map(|u| u.sweep_width_nm).sum::<f64>() / n,
            )
        };

        Ok(EffortEstimate {
            coverage_factor: coverage,
            pod,
            recommended_time_h: recommended_search_time(area_nm2, mean_speed, mean_sweep),
            optimal_spacing_nm: optimal_track_spacing(detection_range_nm, pod),
            unit_efforts: units
                .iter()
                .map(|u| UnitEffort {
                    id: u.id.clone(),
                    effort_nm2: u.effort_nm2(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, speed: f64, endurance: f64, sweep: f64) -> SearchUnit {
        SearchUnit::new(id, speed, endurance, sweep).unwrap()
    }

    #[test]
    fn test_coverage_factor() {
        let units = vec![unit("a", 10.0, 6.0, 2.0), unit("b", 10.0, 6.0, 2.0)];
        // 2 x (2 * 10 * 6) = 240 over 400
        assert!((coverage_factor(&units, 400.0) - 0.6).abs() < 1e-12);
        assert_eq!(coverage_factor(&[], 400.0), 0.0);
        assert_eq!(coverage_factor(&units, 0.0), 0.0);
    }

    #[test]
    fn test_pod_curve() {
        assert_eq!(pod(0.0), 0.0);
        assert!((pod(0.6) - (1.0 - (-0.6_f64).exp())).abs() < 1e-12);
        // clamp: coverage 10 would give 0.99995
        assert_eq!(pod(10.0), POD_CEILING);
        assert_eq!(pod(1000.0), POD_CEILING);
    }

    #[test]
    fn test_pod_monotonic() {
        let mut last = 0.0;
        for i in 0..100 {
            let p = pod(i as f64 * 0.05);
            assert!(p >= last, "pod regressed at step {i}");
            assert!(p <= POD_CEILING);
            last = p;
        }
    }

    #[test]
    fn test_cumulative_pod() {
        // three equal passes at 0.5
        let p = cumulative_pod(&[0.5, 0.5, 0.5]);
        assert!((p - 0.875).abs() < 1e-12);

        // non-decreasing as passes accumulate, never reaching 1
        let passes = [0.3; 20];
        let mut last = 0.0;
        for n in 1..=passes.len() {
            let p = cumulative_pod(&passes[..n]);
            assert!(p >= last);
            assert!(p < 1.0);
            last = p;
        }
        assert_eq!(cumulative_pod(&[]), 0.0);
    }

    #[test]
    fn test_recommended_search_time() {
        // 400 nm2 at 10 kn with 2 nm sweep: 400 / (0.7 * 20)
        let t = recommended_search_time(400.0, 10.0, 2.0);
        assert!((t - 400.0 / 14.0).abs() < 1e-12);

        // small area floors at one hour
        assert_eq!(recommended_search_time(1.0, 10.0, 2.0), 1.0);
        // degenerate sweep rate floors instead of dividing to infinity
        assert_eq!(recommended_search_time(400.0, 0.0, 2.0), 1.0);
        assert!(recommended_search_time(400.0, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_optimal_track_spacing_tiers() {
        let range = 4.0;
        assert!((optimal_track_spacing(range, 0.95) - 4.0 * 0.9 * 1.5).abs() < 1e-12);
        assert!((optimal_track_spacing(range, 0.75) - 4.0 * 0.7 * 1.5).abs() < 1e-12);
        assert!((optimal_track_spacing(range, 0.55) - 4.0 * 0.5 * 1.5).abs() < 1e-12);
        assert!((optimal_track_spacing(range, 0.2) - 4.0 * 0.3 * 1.5).abs() < 1e-12);
        // tier boundaries are inclusive
        assert!((optimal_track_spacing(range, 0.9) - 4.0 * 0.9 * 1.5).abs() < 1e-12);
        assert!((optimal_track_spacing(range, 0.7) - 4.0 * 0.7 * 1.5).abs() < 1e-12);
        assert!((optimal_track_spacing(range, 0.5) - 4.0 * 0.5 * 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_tasking_is_not_an_error() {
        let estimate = EffortEstimate::evaluate(&[], 1000.0, 5.0).unwrap();
        assert_eq!(estimate.coverage_factor, 0.0);
        assert_eq!(estimate.pod, 0.0);
        assert!(estimate.recommended_time_h.is_finite());
        assert!(estimate.recommended_time_h >= 1.0);
        assert!(estimate.unit_efforts.is_empty());
    }

    #[test]
    fn test_evaluate_full_plan() {
        let units = vec![unit("helo", 90.0, 2.0, 1.5), unit("cutter", 12.0, 10.0, 2.0)];
        let estimate = EffortEstimate::evaluate(&units, 500.0, 4.0).unwrap();

        // 270 + 240 = 510 over 500
        assert!((estimate.coverage_factor - 1.02).abs() < 1e-12);
        assert!((estimate.pod - (1.0 - (-1.02_f64).exp())).abs() < 1e-12);
        assert_eq!(estimate.unit_efforts.len(), 2);
        assert_eq!(estimate.unit_efforts[0].id, "helo");
        assert!((estimate.unit_efforts[0].effort_nm2 - 270.0).abs() < 1e-12);
        // mean speed 51, mean sweep 1.75
        let expected: f64 = 500.0 / (0.7 * 51.0 * 1.75);
        assert!((estimate.recommended_time_h - expected.max(1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_rejects_bad_units() {
        let mut bad = unit("x", 10.0, 5.0, 2.0);
        bad.sweep_width_nm = -1.0;
        assert!(EffortEstimate::evaluate(&[bad], 100.0, 4.0).is_err());
        assert!(SearchUnit::new("y", f64::NAN, 1.0, 1.0).is_err());
        assert!(EffortEstimate::evaluate(&[], -5.0, 4.0).is_err());
    }
}
