//! Minimal ring polygon
//!
//! Ordered vertex list with explicit closure (first vertex repeated at the
//! end). Area and perimeter use a planar shoelace on a local
//! equirectangular projection centered at the vertex centroid, so results
//! are in nautical miles directly. The flat-Earth approximation is the
//! pinned behavior at search-area scales; do not swap in a geodesic area
//! algorithm, downstream numbers depend on this one.

use serde::{Deserialize, Serialize};

use crate::geo::{destination_point, GeoPosition};

/// Vertices in a synthesized circle polygon (10 degree steps).
pub const CIRCLE_VERTICES: usize = 36;

/// Areas at or below this are treated as degenerate, nm^2.
pub const MIN_AREA_NM2: f64 = 1e-6;

/// A closed ring of geographic vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<GeoPosition>,
}

impl Polygon {
    /// Build a polygon from a vertex list, closing the ring if the caller
    /// left it open. Vertices are kept verbatim otherwise.
    pub fn new(mut vertices: Vec<GeoPosition>) -> Self {
        if vertices.len() >= 2 {
            let first = vertices[0];
            if vertices[vertices.len() - 1] != first {
                vertices.push(first);
            }
        }
        Polygon { vertices }
    }

    /// Regular circle approximation: [`CIRCLE_VERTICES`] points at 10
    /// degree bearing steps around `center`.
    pub fn circle(center: &GeoPosition, radius_nm: f64) -> Self {
        let step = 360.0 / CIRCLE_VERTICES as f64;
        let ring = (0..CIRCLE_VERTICES)
            .map(|i| destination_point(center, radius_nm, i as f64 * step))
            .collect();
        Polygon::new(ring)
    }

    /// The closed ring, first vertex repeated at the end.
    pub fn ring(&self) -> &[GeoPosition] {
        &self.vertices
    }

    /// Consume the polygon, yielding the closed ring.
    pub fn into_ring(self) -> Vec<GeoPosition> {
        self.vertices
    }

    /// Boundary vertices excluding the closing duplicate.
    fn boundary(&self) -> &[GeoPosition] {
        let n = self.vertices.len();
        if n >= 2 && self.vertices[0] == self.vertices[n - 1] {
            &self.vertices[..n - 1]
        } else {
            &self.vertices
        }
    }

    /// Number of pairwise-distinct boundary vertices.
    pub fn distinct_vertex_count(&self) -> usize {
        let boundary = self.boundary();
        let mut distinct: Vec<GeoPosition> = Vec::with_capacity(boundary.len());
        for v in boundary {
            if !distinct.contains(v) {
                distinct.push(*v);
            }
        }
        distinct.len()
    }

    /// Arithmetic mean of the boundary vertices.
    ///
    /// Adequate for search-area extents; rings spanning the antimeridian
    /// are not supported by the planar projection anyway.
    pub fn centroid(&self) -> GeoPosition {
        let boundary = self.boundary();
        if boundary.is_empty() {
            return GeoPosition::default();
        }
        let n = boundary.len() as f64;
        let lat = boundary.iter().map(|p| p.lat_deg).sum::<f64>() / n;
        let lon = boundary.iter().map(|p| p.lon_deg).sum::<f64>() / n;
        GeoPosition {
            lat_deg: lat,
            lon_deg: lon,
        }
    }

    /// Enclosed area by the planar shoelace formula, nm^2.
    pub fn area_nm2(&self) -> f64 {
        if self.vertices.len() < 4 {
            return 0.0;
        }
        let origin = self.centroid();
        let mut sum = 0.0;
        for pair in self.vertices.windows(2) {
            let (x1, y1) = project(&pair[0], &origin);
            let (x2, y2) = project(&pair[1], &origin);
            sum += x1 * y2 - x2 * y1;
        }
        sum.abs() / 2.0
    }

    /// Ring length on the same planar projection, nm.
    pub fn perimeter_nm(&self) -> f64 {
        if self.vertices.len() < 2 {
            return 0.0;
        }
        let origin = self.centroid();
        let mut sum = 0.0;
        for pair in self.vertices.windows(2) {
            let (x1, y1) = project(&pair[0], &origin);
            let (x2, y2) = project(&pair[1], &origin);
            sum += (x2 - x1).hypot(y2 - y1);
        }
        sum
    }

    /// Even-odd ray casting test in lon/lat space.
    pub fn contains(&self, p: &GeoPosition) -> bool {
        let boundary = self.boundary();
        let n = boundary.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (boundary[i].lon_deg, boundary[i].lat_deg);
            let (xj, yj) = (boundary[j].lon_deg, boundary[j].lat_deg);
            if ((yi > p.lat_deg) != (yj > p.lat_deg))
                && (p.lon_deg < (xj - xi) * (p.lat_deg - yi) / (yj - yi) + xi)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// At least 3 distinct vertices and a non-degenerate area.
    pub fn is_valid(&self) -> bool {
        self.distinct_vertex_count() >= 3 && self.area_nm2() > MIN_AREA_NM2
    }
}

// Local equirectangular projection centered on the ring centroid:
// x = dlon * 60 * cos(centroid lat), y = dlat * 60, both nm.
fn project(p: &GeoPosition, origin: &GeoPosition) -> (f64, f64) {
    let x = (p.lon_deg - origin.lon_deg) * 60.0 * origin.lat_rad().cos();
    let y = (p.lat_deg - origin.lat_deg) * 60.0;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64) -> GeoPosition {
        GeoPosition::new(lat, lon).unwrap()
    }

    fn unit_square(lat0: f64, lon0: f64) -> Polygon {
        Polygon::new(vec![
            pos(lat0, lon0),
            pos(lat0 + 1.0, lon0),
            pos(lat0 + 1.0, lon0 + 1.0),
            pos(lat0, lon0 + 1.0),
        ])
    }

    #[test]
    fn test_new_closes_open_ring() {
        let p = unit_square(0.0, 0.0);
        assert_eq!(p.ring().len(), 5);
        assert_eq!(p.ring()[0], p.ring()[4]);
        assert_eq!(p.distinct_vertex_count(), 4);

        // already closed input stays as-is
        let closed = Polygon::new(p.ring().to_vec());
        assert_eq!(closed.ring().len(), 5);
    }

    #[test]
    fn test_square_area_at_equator() {
        // one degree square straddling the equator: ~60 x 60 nm
        let p = unit_square(-0.5, 10.0);
        assert!((p.area_nm2() - 3600.0).abs() < 1.0, "got {}", p.area_nm2());
        assert!((p.perimeter_nm() - 240.0).abs() < 0.5);
    }

    #[test]
    fn test_area_shrinks_with_latitude() {
        let equator = unit_square(-0.5, 10.0).area_nm2();
        let north = unit_square(60.0, 10.0).area_nm2();
        // dx scales by cos(60.5 deg)
        let expected = 3600.0 * (60.5_f64).to_radians().cos();
        assert!((north - expected).abs() < 1.0, "got {north}");
        assert!(north < equator / 2.0 + 100.0);
    }

    #[test]
    fn test_circle_area_approximates_pi_r_squared() {
        let center = pos(57.0, 11.0);
        let p = Polygon::circle(&center, 10.0);
        assert_eq!(p.distinct_vertex_count(), CIRCLE_VERTICES);
        let exact = std::f64::consts::PI * 100.0;
        let relative = (p.area_nm2() - exact).abs() / exact;
        assert!(relative < 0.03, "relative error {relative}");
        assert!(p.area_nm2() > 0.0);
        assert!(p.is_valid());
    }

    #[test]
    fn test_contains() {
        let p = unit_square(10.0, 20.0);
        assert!(p.contains(&pos(10.5, 20.5)));
        assert!(!p.contains(&pos(11.5, 20.5)));
        assert!(!p.contains(&pos(10.5, 19.5)));
        assert!(!p.contains(&pos(-10.5, -20.5)));
    }

    #[test]
    fn test_degenerate_rings() {
        let single = Polygon::new(vec![pos(1.0, 1.0)]);
        assert!(!single.is_valid());
        assert_eq!(single.area_nm2(), 0.0);

        let dup = Polygon::new(vec![pos(1.0, 1.0), pos(1.0, 1.0), pos(1.0, 1.0)]);
        assert!(!dup.is_valid());
        assert_eq!(dup.distinct_vertex_count(), 1);

        let line = Polygon::new(vec![pos(1.0, 1.0), pos(2.0, 1.0)]);
        assert!(!line.is_valid());
    }

    #[test]
    fn test_collinear_ring_is_degenerate() {
        let p = Polygon::new(vec![pos(1.0, 1.0), pos(2.0, 1.0), pos(3.0, 1.0)]);
        assert_eq!(p.distinct_vertex_count(), 3);
        assert!(p.area_nm2() <= MIN_AREA_NM2);
        assert!(!p.is_valid());
    }

    #[test]
    fn test_centroid() {
        let p = unit_square(10.0, 20.0);
        let c = p.centroid();
        assert!((c.lat_deg - 10.5).abs() < 1e-12);
        assert!((c.lon_deg - 20.5).abs() < 1e-12);
    }
}
