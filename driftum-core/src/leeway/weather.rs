//! Weather observation input type
//!
//! A single wind + surface-current sample. Directions are the direction of
//! flow in degrees true: `wind_dir_deg` is downwind (where the wind blows
//! *toward*, which is where a drifting object goes), `current_dir_deg` is
//! the current set. Speeds are knots.
//!
//! Time-series schedules are reduced to one observation by *vector* mean -
//! each sample converts to east/north components, components average, and
//! the mean converts back. A scalar mean of directions would bias the
//! result and is deliberately not offered.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::drift::DriftVector;
use crate::error::{check_angle, check_speed, EngineError};
use crate::geo::normalize_bearing;

/// One wind/current sample, optionally timestamped when it came from a
/// time-ordered schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Downwind direction in degrees true (direction the wind blows toward)
    pub wind_dir_deg: f64,
    /// Wind speed in knots
    pub wind_speed_kn: f64,
    /// Current set in degrees true (direction the current flows toward)
    pub current_dir_deg: f64,
    /// Current speed in knots
    pub current_speed_kn: f64,
    /// Sample time in milliseconds since epoch, when part of a schedule
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<u64>,
}

impl WeatherObservation {
    /// Create a validated observation. Directions are normalized into
    /// [0, 360); speeds must be finite and non-negative.
    pub fn new(
        wind_dir_deg: f64,
        wind_speed_kn: f64,
        current_dir_deg: f64,
        current_speed_kn: f64,
    ) -> Result<Self, EngineError> {
        Ok(WeatherObservation {
            wind_dir_deg: normalize_bearing(check_angle(wind_dir_deg, "wind_dir_deg")?),
            wind_speed_kn: check_speed(wind_speed_kn)?,
            current_dir_deg: normalize_bearing(check_angle(current_dir_deg, "current_dir_deg")?),
            current_speed_kn: check_speed(current_speed_kn)?,
            timestamp: None,
        })
    }

    /// Attach a schedule timestamp (milliseconds since epoch).
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Re-check invariants on an observation built directly.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_angle(self.wind_dir_deg, "wind_dir_deg")?;
        check_speed(self.wind_speed_kn)?;
        check_angle(self.current_dir_deg, "current_dir_deg")?;
        check_speed(self.current_speed_kn)?;
        Ok(())
    }

    /// Wind as a drift vector (downwind direction, full wind speed).
    pub fn wind_vector(&self) -> DriftVector {
        DriftVector::new(self.wind_dir_deg, self.wind_speed_kn)
    }

    /// Current as a drift vector. Contributes 100% of its reported
    /// speed - there is no attenuation factor.
    pub fn current_vector(&self) -> DriftVector {
        DriftVector::new(self.current_dir_deg, self.current_speed_kn)
    }

    /// Vector mean of a weather schedule.
    ///
    /// Wind and current average independently, component-wise. Returns
    /// `None` for an empty slice. The result carries no timestamp.
    pub fn vector_mean(samples: &[WeatherObservation]) -> Option<WeatherObservation> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mut wind = Vector2::zeros();
        let mut current = Vector2::zeros();
        for s in samples {
            wind += s.wind_vector().east_north();
            current += s.current_vector().east_north();
        }
        let wind = DriftVector::from_east_north(wind / n);
        let current = DriftVector::from_east_north(current / n);
        Some(WeatherObservation {
            wind_dir_deg: wind.direction_deg,
            wind_speed_kn: wind.speed_kn,
            current_dir_deg: current.direction_deg,
            current_speed_kn: current.speed_kn,
            timestamp: None,
        })
    }
}
