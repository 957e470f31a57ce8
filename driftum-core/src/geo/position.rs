//! Geographic position value type
//!
//! Positions are WGS84-style lat/lon in decimal degrees. The constructor
//! is the validation gate demanded by the engine entry points: latitude
//! must be finite and within [-90, 90], longitude finite (normalized into
//! [-180, 180) on construction).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Latitude in degrees, positive north
    pub lat_deg: f64,
    /// Longitude in degrees, positive east, normalized to [-180, 180)
    pub lon_deg: f64,
}

impl GeoPosition {
    /// Create a validated position.
    ///
    /// Longitude is normalized into [-180, 180); latitude must already be
    /// within [-90, 90].
    pub fn new(lat_deg: f64, lon_deg: f64) -> Result<Self, EngineError> {
        if !lat_deg.is_finite() || lat_deg.abs() > 90.0 {
            return Err(EngineError::InvalidLatitude(lat_deg));
        }
        if !lon_deg.is_finite() {
            return Err(EngineError::InvalidLongitude(lon_deg));
        }
        Ok(GeoPosition {
            lat_deg,
            lon_deg: normalize_longitude(lon_deg),
        })
    }

    /// Re-check the invariants on a position that may have been built
    /// directly (struct literal, deserialization).
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.lat_deg.is_finite() || self.lat_deg.abs() > 90.0 {
            return Err(EngineError::InvalidLatitude(self.lat_deg));
        }
        if !self.lon_deg.is_finite() {
            return Err(EngineError::InvalidLongitude(self.lon_deg));
        }
        Ok(())
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat_deg.to_radians()
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon_deg.to_radians()
    }
}

/// Normalize a longitude into [-180, 180).
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    let wrapped = (lon_deg + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can return the open bound itself when the argument is a
    // tiny negative number, fold it back
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
