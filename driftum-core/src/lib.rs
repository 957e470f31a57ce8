//! Drift and Search-Planning Core
//!
//! Platform-independent search-and-rescue drift computation: project a
//! last known position through wind and current to a set of datum points,
//! synthesize prioritized search areas around them, and estimate the
//! search effort those areas need. Pure computation throughout, usable in
//! both native and WASM environments: no I/O, no async, no clock access.
//!
//! # Architecture
//!
//! - **geo**: spherical-Earth navigation math and unit constants
//! - **leeway**: wind/current observations, leeway coefficient tables,
//!   drift vector composition
//! - **datum**: drift scenario to datum points plus search radius
//! - **area**: mode-polymorphic search-area synthesizer with sub-area
//!   partitioning and optional GeoJSON export
//! - **effort**: coverage, POD, and track-spacing arithmetic
//!
//! # Example
//!
//! ```rust,ignore
//! use driftum_core::area::{single_point, AreaOptions};
//! use driftum_core::datum::{compute_datum_set, DatumLabel, DatumOptions, DriftScenario};
//! use driftum_core::effort::{EffortEstimate, SearchUnit};
//! use driftum_core::geo::GeoPosition;
//! use driftum_core::leeway::{LeewayTable, WeatherObservation};
//!
//! // A liferaft last seen 2 hours ago in a fresh southwesterly
//! let scenario = DriftScenario {
//!     lkp: GeoPosition::new(59.4, 22.1)?,
//!     weather: WeatherObservation::new(45.0, 18.0, 120.0, 0.8)?,
//!     object_key: "liferaft_6p".into(),
//!     elapsed_hours: 2.0,
//!     options: DatumOptions::default(),
//! };
//! let datums = compute_datum_set(&scenario, &LeewayTable::default())?;
//!
//! // Search area around the center datum, then the effort to cover it
//! let center = datums.point(DatumLabel::Center).unwrap().position;
//! let area = single_point(center, datums.search_radius_nm, &AreaOptions::default())?;
//! let units = vec![SearchUnit::new("RHIB-1", 10.0, 6.0, 2.0)?];
//! let estimate = EffortEstimate::evaluate(&units, area.area_nm2, 4.0)?;
//! ```

pub mod area;
pub mod datum;
pub mod effort;
mod error;
pub mod geo;
pub mod leeway;

pub use error::EngineError;

// The working set most callers need, re-exported at the crate root.
pub use area::{AreaMode, AreaOptions, SearchArea, SubArea};
pub use datum::{compute_datum_set, DatumLabel, DatumOptions, DatumPoint, DatumSet, DriftScenario};
pub use effort::{EffortEstimate, SearchUnit};
pub use geo::GeoPosition;
pub use leeway::{DriftVector, LeewayCoefficients, LeewayTable, WeatherObservation};
