//! Sub-area partitioning
//!
//! Splits a synthesized search area into assignable pieces sized off the
//! track spacing: grid cells for polygonal areas, distance legs along a
//! line buffer, concentric rings around a single datum. Each piece is
//! roughly ten track spacings across so one search unit can sweep it in a
//! reasonable number of legs.

use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use crate::geo::{destination_point, great_circle_distance, initial_bearing, GeoPosition};

// Partition pieces are sized at ten track spacings.
const CELL_SPACING_FACTOR: f64 = 10.0;

/// One assignable piece of a search area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubArea {
    /// 1-based index within the parent area
    pub id: u32,
    /// Closed ring (for ring partitions, the outer edge of the annulus)
    pub boundary: Vec<GeoPosition>,
    pub area_nm2: f64,
}

impl SubArea {
    fn from_polygon(id: u32, polygon: Polygon) -> Self {
        let area_nm2 = polygon.area_nm2();
        SubArea {
            id,
            boundary: polygon.into_ring(),
            area_nm2,
        }
    }
}

/// Uniform lat/lon grid over the polygon's bounding box, keeping the
/// cells whose center lies inside the ring.
pub(crate) fn grid_partition(boundary: &Polygon, track_spacing_nm: f64) -> Vec<SubArea> {
    let ring = boundary.ring();
    if ring.is_empty() {
        return Vec::new();
    }

    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lon = f64::MAX;
    let mut max_lon = f64::MIN;
    for p in ring {
        min_lat = min_lat.min(p.lat_deg);
        max_lat = max_lat.max(p.lat_deg);
        min_lon = min_lon.min(p.lon_deg);
        max_lon = max_lon.max(p.lon_deg);
    }

    let cell_nm = CELL_SPACING_FACTOR * track_spacing_nm;
    let center_lat = boundary.centroid().lat_rad();
    let lat_step = cell_nm / 60.0;
    let lon_step = cell_nm / (60.0 * center_lat.cos().max(1e-6));

    let rows = (((max_lat - min_lat) / lat_step).ceil() as usize).max(1);
    let cols = (((max_lon - min_lon) / lon_step).ceil() as usize).max(1);

    let mut cells = Vec::new();
    let mut id = 1;
    for row in 0..rows {
        let lat0 = min_lat + row as f64 * lat_step;
        for col in 0..cols {
            let lon0 = min_lon + col as f64 * lon_step;
            let center = GeoPosition {
                lat_deg: lat0 + lat_step / 2.0,
                lon_deg: lon0 + lon_step / 2.0,
            };
            if !boundary.contains(&center) {
                continue;
            }
            let cell = Polygon::new(vec![
                GeoPosition {
                    lat_deg: lat0,
                    lon_deg: lon0,
                },
                GeoPosition {
                    lat_deg: lat0 + lat_step,
                    lon_deg: lon0,
                },
                GeoPosition {
                    lat_deg: lat0 + lat_step,
                    lon_deg: lon0 + lon_step,
                },
                GeoPosition {
                    lat_deg: lat0,
                    lon_deg: lon0 + lon_step,
                },
            ]);
            cells.push(SubArea::from_polygon(id, cell));
            id += 1;
        }
    }
    cells
}

/// Distance legs along a poly-line buffer. Each segment is cut into
/// pieces of at most ten track spacings, and every piece becomes a
/// buffer quad at the parent's half width.
pub(crate) fn line_partition(
    line: &[GeoPosition],
    half_width_nm: f64,
    track_spacing_nm: f64,
) -> Vec<SubArea> {
    let leg_nm = CELL_SPACING_FACTOR * track_spacing_nm;
    let mut legs = Vec::new();
    let mut id = 1;

    for pair in line.windows(2) {
        let seg_len = great_circle_distance(&pair[0], &pair[1]);
        if seg_len <= 0.0 {
            continue;
        }
        let bearing = initial_bearing(&pair[0], &pair[1]);
        let pieces = ((seg_len / leg_nm).ceil() as usize).max(1);
        for k in 0..pieces {
            let d0 = k as f64 * leg_nm;
            let d1 = (d0 + leg_nm).min(seg_len);
            let p0 = destination_point(&pair[0], d0, bearing);
            let p1 = destination_point(&pair[0], d1, bearing);
            let quad = Polygon::new(vec![
                destination_point(&p0, half_width_nm, bearing - 90.0),
                destination_point(&p1, half_width_nm, bearing - 90.0),
                destination_point(&p1, half_width_nm, bearing + 90.0),
                destination_point(&p0, half_width_nm, bearing + 90.0),
            ]);
            legs.push(SubArea::from_polygon(id, quad));
            id += 1;
        }
    }
    legs
}

/// Concentric rings around a circular area's datum, each ten track
/// spacings wide, innermost first. At least one ring.
pub(crate) fn ring_partition(
    center: &GeoPosition,
    radius_nm: f64,
    track_spacing_nm: f64,
) -> Vec<SubArea> {
    let width_nm = CELL_SPACING_FACTOR * track_spacing_nm;
    let count = ((radius_nm / width_nm).ceil() as usize).max(1);

    let mut rings = Vec::with_capacity(count);
    let mut inner_area = 0.0;
    for i in 1..=count {
        let outer_r = (i as f64 * width_nm).min(radius_nm);
        let outer = Polygon::circle(center, outer_r);
        let outer_area = outer.area_nm2();
        rings.push(SubArea {
            id: i as u32,
            boundary: outer.into_ring(),
            area_nm2: outer_area - inner_area,
        });
        inner_area = outer_area;
    }
    rings
}
