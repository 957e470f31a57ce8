//! Spherical-Earth navigation formulas
//!
//! Pure functions over validated [`GeoPosition`] values: haversine
//! distance, forward azimuth and the direct (destination point) problem.
//! All distances are nautical miles, all bearings degrees true.
//!
//! The Earth radius is pinned to 3440.065 nm; downstream numeric
//! expectations are tied to this exact value. Trig domain arguments are
//! clamped so floating-point drift can never produce NaN from valid input.

use super::position::{normalize_longitude, GeoPosition};

/// Mean Earth radius in nautical miles. Must not change.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Normalize a bearing into [0, 360).
pub fn normalize_bearing(bearing_deg: f64) -> f64 {
    let b = bearing_deg.rem_euclid(360.0);
    // rem_euclid(-1e-16, 360) rounds to 360.0 itself, fold it back
    if b >= 360.0 {
        0.0
    } else {
        b
    }
}

/// Great-circle distance between two positions in nautical miles
/// (haversine formula).
pub fn great_circle_distance(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let phi1 = a.lat_rad();
    let phi2 = b.lat_rad();
    let dphi = (b.lat_deg - a.lat_deg).to_radians();
    let dlambda = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dphi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_NM * c
}

/// Initial bearing (forward azimuth) from `a` to `b` in degrees [0, 360).
///
/// Coincident points yield 0.0 by convention.
pub fn initial_bearing(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let phi1 = a.lat_rad();
    let phi2 = b.lat_rad();
    let dlambda = (b.lon_deg - a.lon_deg).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Destination point given start, distance (nm) and bearing (degrees).
///
/// Direct spherical navigation formula. A zero distance returns the start
/// point unchanged; the bearing is normalized mod 360. Behavior within a
/// few meters of the poles is best-effort.
pub fn destination_point(origin: &GeoPosition, distance_nm: f64, bearing_deg: f64) -> GeoPosition {
    if distance_nm == 0.0 {
        return *origin;
    }

    let delta = distance_nm / EARTH_RADIUS_NM;
    let theta = normalize_bearing(bearing_deg).to_radians();
    let phi1 = origin.lat_rad();
    let lambda1 = origin.lon_rad();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();

    let y = theta.sin() * delta.sin() * phi1.cos();
    let x = delta.cos() - phi1.sin() * phi2.sin();
    let lambda2 = lambda1 + y.atan2(x);

    GeoPosition {
        lat_deg: phi2.to_degrees().clamp(-90.0, 90.0),
        lon_deg: normalize_longitude(lambda2.to_degrees()),
    }
}
