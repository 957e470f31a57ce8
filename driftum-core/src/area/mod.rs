//! Search-Area Synthesizer
//!
//! Turns datum points into concrete, partitioned search areas. All
//! boundaries are closed vertex rings; areas come from the planar
//! shoelace in [`polygon`], so the numbers line up with the rest of the
//! planning pipeline.
//!
//! # Architecture
//!
//! - **polygon**: minimal ring type, flat-Earth area/perimeter, point test
//! - **partition**: sub-area splitting (grid cells, line legs, rings)
//! - **geojson**: boundary interchange, behind the `geojson` feature
//! - mode builders in this file: [`two_points`], [`single_point`],
//!   [`along_line`], [`distant_areas`], [`manual`]
//!
//! # Example
//!
//! ```rust,ignore
//! use driftum_core::area::{single_point, AreaOptions};
//!
//! let datum = GeoPosition::new(59.0, 21.0)?;
//! let area = single_point(datum, 12.5, &AreaOptions::default())?;
//! println!("{:.0} nm2 in {} sub-areas", area.area_nm2, area.sub_areas.len());
//! ```
//!
//! Degenerate input (duplicate or collinear points) never fails: the
//! builder falls back to a minimum-size circle and logs the recovery.

mod partition;
mod polygon;

#[cfg(feature = "geojson")]
mod geojson;

pub use partition::SubArea;
pub use polygon::{Polygon, CIRCLE_VERTICES, MIN_AREA_NM2};

#[cfg(feature = "geojson")]
pub use geojson::{area_to_feature, areas_to_collection, boundary_geometry, sub_areas_to_features};

use serde::{Deserialize, Serialize};

use crate::error::{check_angle, check_non_negative, check_positive, EngineError};
use crate::geo::{destination_point, great_circle_distance, initial_bearing, GeoPosition};
use partition::{grid_partition, line_partition, ring_partition};

/// Default track spacing used for partition sizing, nm.
pub const DEFAULT_TRACK_SPACING_NM: f64 = 1.0;

/// Default extra width added to a two-point rectangle, nm.
pub const DEFAULT_MARGIN_NM: f64 = 1.0;

/// Default mutual-distance threshold for datum grouping, nm.
pub const DEFAULT_GROUP_THRESHOLD_NM: f64 = 50.0;

/// Radius of the recovery circle for degenerate geometry, nm.
pub const MIN_FALLBACK_RADIUS_NM: f64 = 0.5;

/// How an area's boundary was synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaMode {
    TwoPoints,
    SinglePoint,
    AlongLine,
    DistantAreas,
    Manual,
}

/// Synthesizer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaOptions {
    /// Track spacing the partitions are sized off, nm
    pub track_spacing_nm: f64,
    /// Extra width added to the two-point rectangle, nm
    pub margin_nm: f64,
    /// Mutual-distance threshold for datum grouping, nm
    pub group_threshold_nm: f64,
}

impl Default for AreaOptions {
    fn default() -> Self {
        AreaOptions {
            track_spacing_nm: DEFAULT_TRACK_SPACING_NM,
            margin_nm: DEFAULT_MARGIN_NM,
            group_threshold_nm: DEFAULT_GROUP_THRESHOLD_NM,
        }
    }
}

impl AreaOptions {
    fn validate(&self) -> Result<(), EngineError> {
        check_positive(self.track_spacing_nm, "track_spacing_nm")?;
        check_non_negative(self.margin_nm, "margin_nm")?;
        check_positive(self.group_threshold_nm, "group_threshold_nm")?;
        Ok(())
    }
}

/// One synthesized search area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchArea {
    /// 1-based identifier within one synthesizer call
    pub id: u32,
    pub mode: AreaMode,
    /// Closed vertex ring (first vertex repeated at the end)
    pub boundary: Vec<GeoPosition>,
    pub center: GeoPosition,
    /// Enclosed area from the planar shoelace, nm^2
    pub area_nm2: f64,
    pub sub_areas: Vec<SubArea>,
    /// Search order, 1 is first
    pub priority: u32,
    /// Probability of containment assigned to this area, [0, 1]
    pub containment: f64,
}

impl SearchArea {
    /// Even-odd point test against the boundary ring.
    pub fn contains(&self, p: &GeoPosition) -> bool {
        Polygon::new(self.boundary.clone()).contains(p)
    }

    fn from_polygon(mode: AreaMode, polygon: Polygon, center: GeoPosition) -> Self {
        let area_nm2 = polygon.area_nm2();
        SearchArea {
            id: 1,
            mode,
            boundary: polygon.into_ring(),
            center,
            area_nm2,
            sub_areas: Vec::new(),
            priority: 1,
            containment: 1.0,
        }
    }
}

// Degenerate geometry is recovered, not refused: a minimum-size circle
// around the natural center keeps the pipeline moving.
fn fallback_circle(mode: AreaMode, center: GeoPosition, options: &AreaOptions) -> SearchArea {
    log::debug!(
        "{mode:?}: degenerate geometry, falling back to {MIN_FALLBACK_RADIUS_NM} nm circle"
    );
    let polygon = Polygon::circle(&center, MIN_FALLBACK_RADIUS_NM);
    let mut area = SearchArea::from_polygon(mode, polygon, center);
    area.sub_areas = ring_partition(&center, MIN_FALLBACK_RADIUS_NM, options.track_spacing_nm);
    area
}

/// Oriented rectangle over a left/right datum pair.
///
/// Width is the datum separation plus the margin, length twice the drift
/// distance, long axis along the drift direction, centered at the
/// left/right midpoint.
pub fn two_points(
    left: GeoPosition,
    right: GeoPosition,
    drift_distance_nm: f64,
    drift_direction_deg: f64,
    options: &AreaOptions,
) -> Result<SearchArea, EngineError> {
    left.validate()?;
    right.validate()?;
    check_non_negative(drift_distance_nm, "drift_distance_nm")?;
    check_angle(drift_direction_deg, "drift_direction_deg")?;
    options.validate()?;

    let separation = great_circle_distance(&left, &right);
    let center = destination_point(&left, separation / 2.0, initial_bearing(&left, &right));

    let half_width = (separation + options.margin_nm) / 2.0;
    let half_length = drift_distance_nm;
    let axis = drift_direction_deg;

    let front = destination_point(&center, half_length, axis);
    let back = destination_point(&center, half_length, axis + 180.0);
    let ring = vec![
        destination_point(&front, half_width, axis - 90.0),
        destination_point(&front, half_width, axis + 90.0),
        destination_point(&back, half_width, axis + 90.0),
        destination_point(&back, half_width, axis - 90.0),
    ];

    let polygon = Polygon::new(ring);
    if !polygon.is_valid() {
        return Ok(fallback_circle(AreaMode::TwoPoints, center, options));
    }
    let mut area = SearchArea::from_polygon(AreaMode::TwoPoints, polygon, center);
    area.sub_areas = grid_partition(
        &Polygon::new(area.boundary.clone()),
        options.track_spacing_nm,
    );
    Ok(area)
}

/// Circle of `search_radius_nm` around one datum, as a
/// [`CIRCLE_VERTICES`]-vertex polygon.
pub fn single_point(
    datum: GeoPosition,
    search_radius_nm: f64,
    options: &AreaOptions,
) -> Result<SearchArea, EngineError> {
    datum.validate()?;
    check_non_negative(search_radius_nm, "search_radius_nm")?;
    options.validate()?;

    let polygon = Polygon::circle(&datum, search_radius_nm);
    if !polygon.is_valid() {
        return Ok(fallback_circle(AreaMode::SinglePoint, datum, options));
    }
    let mut area = SearchArea::from_polygon(AreaMode::SinglePoint, polygon, datum);
    area.sub_areas = ring_partition(&datum, search_radius_nm, options.track_spacing_nm);
    Ok(area)
}

/// Constant half-width buffer around a poly-line.
///
/// Each segment is offset 90 degrees off its local bearing to both sides;
/// the forward chain and the reversed opposite chain stitch into one ring.
pub fn along_line(
    line: &[GeoPosition],
    half_width_nm: f64,
    options: &AreaOptions,
) -> Result<SearchArea, EngineError> {
    for p in line {
        p.validate()?;
    }
    check_positive(half_width_nm, "half_width_nm")?;
    options.validate()?;
    let first = match line.first() {
        Some(p) => *p,
        None => {
            return Err(EngineError::InvalidParameter {
                name: "line_points",
                value: 0.0,
            })
        }
    };

    let mut left_chain = Vec::new();
    let mut right_chain = Vec::new();
    for pair in line.windows(2) {
        if great_circle_distance(&pair[0], &pair[1]) <= 0.0 {
            continue;
        }
        let bearing = initial_bearing(&pair[0], &pair[1]);
        left_chain.push(destination_point(&pair[0], half_width_nm, bearing - 90.0));
        left_chain.push(destination_point(&pair[1], half_width_nm, bearing - 90.0));
        right_chain.push(destination_point(&pair[0], half_width_nm, bearing + 90.0));
        right_chain.push(destination_point(&pair[1], half_width_nm, bearing + 90.0));
    }

    right_chain.reverse();
    left_chain.extend(right_chain);
    let polygon = Polygon::new(left_chain);
    if !polygon.is_valid() {
        return Ok(fallback_circle(AreaMode::AlongLine, first, options));
    }
    let center = polygon.centroid();
    let mut area = SearchArea::from_polygon(AreaMode::AlongLine, polygon, center);
    area.sub_areas = line_partition(line, half_width_nm, options.track_spacing_nm);
    Ok(area)
}

/// Group scattered datums by mutual distance and synthesize one area per
/// group.
///
/// A datum joins a group only if it is within the threshold of every
/// existing member (complete linkage), first fitting group wins, groups
/// form in input order. Single-datum groups become circles of
/// `point_radius_nm`; pairs become a merged ellipse; larger groups an
/// expanded polygon pushed outward from the group centroid. Priorities
/// follow group order; probability of containment splits 0.6 of the
/// remaining mass per group, remainder to the last.
///
/// An empty datum list yields an empty vec.
pub fn distant_areas(
    datums: &[GeoPosition],
    point_radius_nm: f64,
    options: &AreaOptions,
) -> Result<Vec<SearchArea>, EngineError> {
    for p in datums {
        p.validate()?;
    }
    check_non_negative(point_radius_nm, "point_radius_nm")?;
    options.validate()?;

    let mut groups: Vec<Vec<usize>> = Vec::new();
    'assign: for (i, p) in datums.iter().enumerate() {
        for group in groups.iter_mut() {
            if group
                .iter()
                .all(|&j| great_circle_distance(p, &datums[j]) <= options.group_threshold_nm)
            {
                group.push(i);
                continue 'assign;
            }
        }
        groups.push(vec![i]);
    }
    log::debug!(
        "distant_areas: {} datums formed {} groups",
        datums.len(),
        groups.len()
    );

    let containments = containment_split(groups.len());
    let mut areas = Vec::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        let mut area = match group.as_slice() {
            [single] => {
                let datum = datums[*single];
                let polygon = Polygon::circle(&datum, point_radius_nm);
                if polygon.is_valid() {
                    let mut a = SearchArea::from_polygon(AreaMode::SinglePoint, polygon, datum);
                    a.sub_areas =
                        ring_partition(&datum, point_radius_nm, options.track_spacing_nm);
                    a
                } else {
                    fallback_circle(AreaMode::SinglePoint, datum, options)
                }
            }
            [a, b] => group_ellipse(datums[*a], datums[*b], point_radius_nm, options),
            _ => group_hull(datums, group, point_radius_nm, options),
        };
        area.id = index as u32 + 1;
        area.priority = index as u32 + 1;
        area.containment = containments[index];
        areas.push(area);
    }
    Ok(areas)
}

/// Caller-supplied ring, verbatim. Only closure, center, area, and
/// partitions are derived.
pub fn manual(ring: Vec<GeoPosition>, options: &AreaOptions) -> Result<SearchArea, EngineError> {
    for p in &ring {
        p.validate()?;
    }
    options.validate()?;
    if ring.is_empty() {
        return Err(EngineError::InvalidParameter {
            name: "ring_points",
            value: 0.0,
        });
    }

    let polygon = Polygon::new(ring);
    if !polygon.is_valid() {
        return Ok(fallback_circle(AreaMode::Manual, polygon.centroid(), options));
    }
    let center = polygon.centroid();
    let mut area = SearchArea::from_polygon(AreaMode::Manual, polygon, center);
    area.sub_areas = grid_partition(
        &Polygon::new(area.boundary.clone()),
        options.track_spacing_nm,
    );
    Ok(area)
}

// Merged ellipse over a close pair: semi-major spans half the separation
// plus the point radius, semi-minor is the point radius, major axis along
// the pair bearing.
fn group_ellipse(
    a: GeoPosition,
    b: GeoPosition,
    point_radius_nm: f64,
    options: &AreaOptions,
) -> SearchArea {
    let separation = great_circle_distance(&a, &b);
    let axis = initial_bearing(&a, &b);
    let center = destination_point(&a, separation / 2.0, axis);
    let semi_major = separation / 2.0 + point_radius_nm;
    let semi_minor = point_radius_nm;

    let step = std::f64::consts::TAU / CIRCLE_VERTICES as f64;
    let ring = (0..CIRCLE_VERTICES)
        .map(|i| {
            let t = i as f64 * step;
            let along = semi_major * t.cos();
            let across = semi_minor * t.sin();
            let bearing = axis + across.atan2(along).to_degrees();
            destination_point(&center, along.hypot(across), bearing)
        })
        .collect();

    let polygon = Polygon::new(ring);
    if !polygon.is_valid() {
        return fallback_circle(AreaMode::DistantAreas, center, options);
    }
    let mut area = SearchArea::from_polygon(AreaMode::DistantAreas, polygon, center);
    area.sub_areas = grid_partition(
        &Polygon::new(area.boundary.clone()),
        options.track_spacing_nm,
    );
    area
}

// Expanded polygon over a group of three or more: members ordered by
// bearing around the group centroid, each pushed outward by the point
// radius so the boundary clears every datum.
fn group_hull(
    datums: &[GeoPosition],
    group: &[usize],
    point_radius_nm: f64,
    options: &AreaOptions,
) -> SearchArea {
    let n = group.len() as f64;
    let centroid = GeoPosition {
        lat_deg: group.iter().map(|&i| datums[i].lat_deg).sum::<f64>() / n,
        lon_deg: group.iter().map(|&i| datums[i].lon_deg).sum::<f64>() / n,
    };

    let mut members: Vec<GeoPosition> = group.iter().map(|&i| datums[i]).collect();
    members.sort_by(|p, q| {
        let bp = initial_bearing(&centroid, p);
        let bq = initial_bearing(&centroid, q);
        bp.partial_cmp(&bq).unwrap_or(std::cmp::Ordering::Equal)
    });

    let ring = members
        .iter()
        .map(|p| destination_point(p, point_radius_nm, initial_bearing(&centroid, p)))
        .collect();

    let polygon = Polygon::new(ring);
    if !polygon.is_valid() {
        return fallback_circle(AreaMode::DistantAreas, centroid, options);
    }
    let mut area = SearchArea::from_polygon(AreaMode::DistantAreas, polygon, centroid);
    area.sub_areas = grid_partition(
        &Polygon::new(area.boundary.clone()),
        options.track_spacing_nm,
    );
    area
}

// First group takes 0.6 of the remaining probability mass, recursively;
// the last group absorbs the remainder so the split sums to 1.
fn containment_split(count: usize) -> Vec<f64> {
    let mut remaining = 1.0;
    let mut split = Vec::with_capacity(count);
    for index in 0..count {
        if index + 1 == count {
            split.push(remaining);
        } else {
            let share = 0.6 * remaining;
            split.push(share);
            remaining -= share;
        }
    }
    split
}
