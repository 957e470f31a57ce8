//! Drift vector computation
//!
//! Turns a weather observation plus a leeway coefficient set into the
//! resultant drift vector of the search object. Wind leeway and current
//! compose as Cartesian vectors: navigational bearings convert to
//! east/north components (east = v sin θ, north = v cos θ), components
//! sum, and the resultant converts back through atan2.
//!
//! Left/right divergence branches perturb the *input* (wind direction for
//! the percentage model, the crosswind sign for the regression model) and
//! re-run the full pipeline. They are never derived by rotating the center
//! displacement; after current composition the branches are asymmetric
//! around the center on purpose.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::objects::LeewayCoefficients;
use super::weather::WeatherObservation;
use crate::geo::normalize_bearing;

/// A drift vector: where the object is being carried, and how fast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftVector {
    /// Direction of drift in degrees true, always within [0, 360)
    pub direction_deg: f64,
    /// Drift speed in knots, >= 0
    pub speed_kn: f64,
}

impl DriftVector {
    /// Create a drift vector, normalizing the direction into [0, 360).
    pub fn new(direction_deg: f64, speed_kn: f64) -> Self {
        DriftVector {
            direction_deg: normalize_bearing(direction_deg),
            speed_kn,
        }
    }

    /// East/north velocity components in knots.
    pub fn east_north(&self) -> Vector2<f64> {
        let theta = self.direction_deg.to_radians();
        Vector2::new(self.speed_kn * theta.sin(), self.speed_kn * theta.cos())
    }

    /// Rebuild a drift vector from east/north components.
    pub fn from_east_north(v: Vector2<f64>) -> Self {
        let speed = v.norm();
        if speed == 0.0 {
            return DriftVector::default();
        }
        DriftVector::new(v.x.atan2(v.y).to_degrees(), speed)
    }

    /// Compose with another vector by component sum.
    ///
    /// A zero-speed operand is the identity element and returns the other
    /// vector bit-for-bit, so that calm current leaves the wind leeway
    /// untouched.
    pub fn compose(&self, other: &DriftVector) -> DriftVector {
        if other.speed_kn == 0.0 {
            return *self;
        }
        if self.speed_kn == 0.0 {
            return *other;
        }
        DriftVector::from_east_north(self.east_north() + other.east_north())
    }
}

/// Which divergence branch of the leeway model to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftBranch {
    /// Nominal downwind solution
    Center,
    /// Divergence to port of the downwind direction
    Left,
    /// Divergence to starboard of the downwind direction
    Right,
}

/// Wind-leeway vector for one branch, before current composition.
///
/// Percentage model: speed = wind_speed x mean(min, max)/100 along the
/// (possibly perturbed) downwind direction. Regression model: downwind and
/// crosswind components are linear in wind speed; the branch picks the
/// crosswind sign. Either way the branch changes the model *input*.
pub fn leeway_vector(
    obs: &WeatherObservation,
    coeffs: &LeewayCoefficients,
    branch: DriftBranch,
) -> DriftVector {
    match *coeffs {
        LeewayCoefficients::Percentage {
            min_pct,
            max_pct,
            divergence_deg,
        } => {
            let speed = obs.wind_speed_kn * (min_pct + max_pct) / 2.0 / 100.0;
            let direction = match branch {
                DriftBranch::Center => obs.wind_dir_deg,
                DriftBranch::Left => obs.wind_dir_deg - divergence_deg,
                DriftBranch::Right => obs.wind_dir_deg + divergence_deg,
            };
            DriftVector::new(direction, speed)
        }
        LeewayCoefficients::Regression {
            dwl_slope,
            dwl_intercept,
            cwl_slope,
            cwl_intercept,
        } => {
            let dwl = dwl_slope * obs.wind_speed_kn + dwl_intercept;
            let cwl = cwl_slope * obs.wind_speed_kn + cwl_intercept;
            let cwl = match branch {
                DriftBranch::Center => cwl,
                DriftBranch::Left => -cwl.abs(),
                DriftBranch::Right => cwl.abs(),
            };
            let speed = (dwl * dwl + cwl * cwl).sqrt();
            let offset_deg = cwl.atan2(dwl).to_degrees();
            DriftVector::new(obs.wind_dir_deg + offset_deg, speed)
        }
    }
}

/// Resultant drift vector for one branch: wind leeway composed with the
/// full current (no attenuation).
pub fn drift_vector_branch(
    obs: &WeatherObservation,
    coeffs: &LeewayCoefficients,
    branch: DriftBranch,
) -> DriftVector {
    drift_vector_scaled(obs, coeffs, branch, 1.0)
}

/// Center-branch resultant drift vector.
pub fn drift_vector(obs: &WeatherObservation, coeffs: &LeewayCoefficients) -> DriftVector {
    drift_vector_scaled(obs, coeffs, DriftBranch::Center, 1.0)
}

/// Resultant drift with the wind-leeway speed scaled by `leeway_scale`.
///
/// Used for min/max uncertainty bounding (scale 0.7 / 1.3). Only the wind
/// component scales; the current is not an uncertainty term here.
pub fn drift_vector_scaled(
    obs: &WeatherObservation,
    coeffs: &LeewayCoefficients,
    branch: DriftBranch,
    leeway_scale: f64,
) -> DriftVector {
    let mut leeway = leeway_vector(obs, coeffs, branch);
    leeway.speed_kn *= leeway_scale;
    leeway.compose(&obs.current_vector())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(wind_dir: f64, wind_kn: f64, cur_dir: f64, cur_kn: f64) -> WeatherObservation {
        WeatherObservation::new(wind_dir, wind_kn, cur_dir, cur_kn).unwrap()
    }

    fn pct(min: f64, max: f64, div: f64) -> LeewayCoefficients {
        LeewayCoefficients::Percentage {
            min_pct: min,
            max_pct: max,
            divergence_deg: div,
        }
    }

    #[test]
    fn test_percentage_center_speed() {
        // 20 kn wind, mean(3, 5) = 4% -> 0.8 kn downwind
        let v = drift_vector(&obs(90.0, 20.0, 0.0, 0.0), &pct(3.0, 5.0, 35.0));
        assert!((v.speed_kn - 0.8).abs() < 1e-12);
        assert!((v.direction_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_current_is_exact_identity() {
        let coeffs = pct(2.0, 4.0, 30.0);
        let o = obs(137.25, 14.0, 200.0, 0.0);
        let with_current = drift_vector(&o, &coeffs);
        let wind_only = leeway_vector(&o, &coeffs, DriftBranch::Center);
        assert_eq!(with_current, wind_only);
    }

    #[test]
    fn test_perpendicular_composition() {
        // 3 kn north + 4 kn east = 5 kn at atan2(4, 3) = 53.13 degrees
        let v = drift_vector(&obs(0.0, 100.0, 90.0, 4.0), &pct(3.0, 3.0, 0.0));
        assert!((v.speed_kn - 5.0).abs() < 1e-9, "got {}", v.speed_kn);
        assert!((v.direction_deg - 53.13).abs() < 0.01, "got {}", v.direction_deg);
    }

    #[test]
    fn test_branch_directions_normalized() {
        let coeffs = pct(3.0, 5.0, 35.0);
        let o = obs(10.0, 10.0, 0.0, 0.0);
        let left = leeway_vector(&o, &coeffs, DriftBranch::Left);
        let right = leeway_vector(&o, &coeffs, DriftBranch::Right);
        assert!((left.direction_deg - 335.0).abs() < 1e-9);
        assert!((right.direction_deg - 45.0).abs() < 1e-9);
        for v in [left, right] {
            assert!((0.0..360.0).contains(&v.direction_deg));
        }
    }

    #[test]
    fn test_regression_branches() {
        let coeffs = LeewayCoefficients::Regression {
            dwl_slope: 0.04,
            dwl_intercept: 0.0,
            cwl_slope: 0.02,
            cwl_intercept: 0.0,
        };
        // 10 kn wind: DWL = 0.4, CWL = 0.2, speed = 0.4472, offset = 26.57 deg
        let o = obs(0.0, 10.0, 0.0, 0.0);
        let center = leeway_vector(&o, &coeffs, DriftBranch::Center);
        let left = leeway_vector(&o, &coeffs, DriftBranch::Left);
        let right = leeway_vector(&o, &coeffs, DriftBranch::Right);

        assert!((center.speed_kn - 0.2_f64.hypot(0.4)).abs() < 1e-12);
        assert!((right.direction_deg - 26.565).abs() < 0.01);
        assert!((left.direction_deg - 333.435).abs() < 0.01);
        // positive computed CWL puts the center on the starboard branch
        assert_eq!(center.direction_deg, right.direction_deg);
    }

    #[test]
    fn test_branches_are_not_rotations_of_center() {
        // With a cross current the left/right resultants are asymmetric:
        // perturbing the input and recomposing is not a rotation.
        let coeffs = pct(3.0, 5.0, 35.0);
        let o = obs(0.0, 20.0, 90.0, 1.0);
        let center = drift_vector_branch(&o, &coeffs, DriftBranch::Center);
        let left = drift_vector_branch(&o, &coeffs, DriftBranch::Left);
        let right = drift_vector_branch(&o, &coeffs, DriftBranch::Right);

        // rotations would preserve speed; composition does not
        assert!((left.speed_kn - right.speed_kn).abs() > 1e-3);
        let d_left = (center.direction_deg - left.direction_deg).abs();
        let d_right = (right.direction_deg - center.direction_deg).abs();
        assert!((d_left - d_right).abs() > 0.1);
    }

    #[test]
    fn test_scaled_leeway_only_scales_wind_component() {
        let coeffs = pct(4.0, 4.0, 0.0);
        let o = obs(0.0, 25.0, 0.0, 0.0);
        let nominal = drift_vector(&o, &coeffs);
        let min = drift_vector_scaled(&o, &coeffs, DriftBranch::Center, 0.7);
        let max = drift_vector_scaled(&o, &coeffs, DriftBranch::Center, 1.3);
        assert!((min.speed_kn - nominal.speed_kn * 0.7).abs() < 1e-12);
        assert!((max.speed_kn - nominal.speed_kn * 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_direction_always_normalized_after_composition() {
        let coeffs = pct(3.0, 5.0, 45.0);
        for wind_dir in [0.0, 90.0, 179.0, 271.5, 359.9] {
            for cur_dir in [0.0, 45.0, 200.0, 330.0] {
                for branch in [DriftBranch::Center, DriftBranch::Left, DriftBranch::Right] {
                    let v = drift_vector_branch(
                        &obs(wind_dir, 15.0, cur_dir, 2.0),
                        &coeffs,
                        branch,
                    );
                    assert!(
                        (0.0..360.0).contains(&v.direction_deg),
                        "direction {} out of range",
                        v.direction_deg
                    );
                    assert!(v.speed_kn >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_zero_vector_round_trip() {
        let zero = DriftVector::from_east_north(Vector2::new(0.0, 0.0));
        assert_eq!(zero.speed_kn, 0.0);
        assert_eq!(zero.direction_deg, 0.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let v = DriftVector::new(123.4, 2.5);
        let json = serde_json::to_string(&v).unwrap();
        let back: DriftVector = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
