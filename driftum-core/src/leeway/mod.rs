//! Leeway and Drift Modelling
//!
//! This module turns a weather observation plus an object type into the
//! drift vector a search planner needs. It is platform-independent and
//! performs no I/O.
//!
//! # Architecture
//!
//! The module is split into three submodules:
//!
//! - **drift**: `DriftVector` (polar velocity), Cartesian composition,
//!   and the branch computation (center / left / right divergence)
//! - **weather**: `WeatherObservation` input type and schedule
//!   vector-averaging
//! - **objects**: `LeewayCoefficients` (percentage and regression models)
//!   and the built-in object-type table
//!
//! # Usage
//!
//! ```rust,ignore
//! use driftum_core::leeway::{
//!     DriftBranch, LeewayTable, WeatherObservation, drift_vector_branch,
//! };
//!
//! let table = LeewayTable::default();
//! let coeffs = table.resolve("liferaft_6p");
//! let weather = WeatherObservation::new(45.0, 18.0, 120.0, 0.8)?;
//!
//! // Total drift down the left divergence branch
//! let drift = drift_vector_branch(&weather, &coeffs, DriftBranch::Left);
//! ```

mod drift;
mod objects;
mod weather;

pub use drift::{
    drift_vector, drift_vector_branch, drift_vector_scaled, leeway_vector, DriftBranch,
    DriftVector,
};
pub use objects::{LeewayCoefficients, LeewayTable};
pub use weather::WeatherObservation;
