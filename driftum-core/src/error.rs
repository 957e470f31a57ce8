//! Engine error type
//!
//! Only caller bugs are errors: malformed coordinates, negative elapsed
//! time, non-finite numbers. Recoverable conditions (unknown object type,
//! degenerate geometry) never surface here - they resolve to documented
//! fallbacks inside the module that detects them.

use thiserror::Error;

/// Input validation errors raised by the engine entry points.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineError {
    /// Latitude outside [-90, 90] degrees or not finite
    #[error("invalid latitude {0}: must be finite and within [-90, 90]")]
    InvalidLatitude(f64),
    /// Longitude not a finite number
    #[error("invalid longitude {0}: must be finite")]
    InvalidLongitude(f64),
    /// Elapsed drift interval negative or not finite
    #[error("invalid elapsed hours {0}: must be finite and >= 0")]
    InvalidElapsed(f64),
    /// Speed input (wind, current, unit) negative or not finite
    #[error("invalid speed {0} kn: must be finite and >= 0")]
    InvalidSpeed(f64),
    /// Any other numeric input that failed the finite check, by name
    #[error("non-finite input: {0}")]
    NonFinite(&'static str),
    /// Named tuning parameter outside its documented domain
    #[error("invalid {name} {value}: outside the accepted range")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Check that a caller-supplied speed is finite and non-negative.
pub(crate) fn check_speed(value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidSpeed(value))
    }
}

/// Check that a caller-supplied angle in degrees is finite.
pub(crate) fn check_angle(value: f64, name: &'static str) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite(name))
    }
}

/// Check that a named tuning parameter is finite and strictly positive.
pub(crate) fn check_positive(value: f64, name: &'static str) -> Result<f64, EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter { name, value })
    }
}

/// Check that a named tuning parameter is finite and non-negative.
pub(crate) fn check_non_negative(value: f64, name: &'static str) -> Result<f64, EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", EngineError::InvalidLatitude(120.0)),
            "invalid latitude 120: must be finite and within [-90, 90]"
        );
        assert_eq!(
            format!("{}", EngineError::NonFinite("wind_dir_deg")),
            "non-finite input: wind_dir_deg"
        );
    }

    #[test]
    fn test_check_speed() {
        assert_eq!(check_speed(12.5), Ok(12.5));
        assert_eq!(check_speed(0.0), Ok(0.0));
        assert!(check_speed(-1.0).is_err());
        assert!(check_speed(f64::NAN).is_err());
        assert!(check_speed(f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_angle() {
        assert_eq!(check_angle(370.0, "bearing"), Ok(370.0));
        assert_eq!(
            check_angle(f64::NAN, "bearing"),
            Err(EngineError::NonFinite("bearing"))
        );
    }

    #[test]
    fn test_check_parameter_domains() {
        assert_eq!(check_positive(1.0, "track_spacing_nm"), Ok(1.0));
        assert!(check_positive(0.0, "track_spacing_nm").is_err());
        assert!(check_positive(-2.0, "track_spacing_nm").is_err());
        assert_eq!(check_non_negative(0.0, "margin_nm"), Ok(0.0));
        assert!(check_non_negative(-0.1, "margin_nm").is_err());
        assert!(check_non_negative(f64::NAN, "margin_nm").is_err());
    }
}
