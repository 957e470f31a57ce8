//! Geodesy Primitives
//!
//! Spherical-Earth navigation math shared by every other module: validated
//! lat/lon positions, great-circle distance, forward azimuth and
//! destination-point projection, plus the unit-conversion constants the
//! caller needs at the API boundary.
//!
//! Everything here is a pure function; positions are plain value types.
//! The Earth radius is pinned to 3440.065 nm for numeric parity with the
//! rest of the planning pipeline.

mod position;
mod spherical;

pub use position::{normalize_longitude, GeoPosition};
pub use spherical::{
    destination_point, great_circle_distance, initial_bearing, normalize_bearing,
    EARTH_RADIUS_NM,
};

/// Meters in one nautical mile.
pub const NAUTICAL_MILE_M: f64 = 1852.0;

/// Conversion from knots to meters per second.
pub const KN_TO_MS: f64 = NAUTICAL_MILE_M / 3600.0;

/// Conversion from meters per second to knots.
pub const MS_TO_KN: f64 = 3600.0 / NAUTICAL_MILE_M;
