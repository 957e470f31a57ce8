//! GeoJSON interchange for search areas
//!
//! Boundary rings and sub-areas exported as `geojson` features so a map
//! layer can render them. Coordinates follow the GeoJSON convention,
//! longitude first. Interchange only, no rendering here.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use super::{SearchArea, SubArea};
use crate::geo::GeoPosition;

fn ring_coordinates(ring: &[GeoPosition]) -> Vec<Vec<f64>> {
    ring.iter().map(|p| vec![p.lon_deg, p.lat_deg]).collect()
}

/// The boundary ring as a GeoJSON `Polygon` geometry.
pub fn boundary_geometry(area: &SearchArea) -> Geometry {
    Geometry::new(Value::Polygon(vec![ring_coordinates(&area.boundary)]))
}

/// One area as a GeoJSON feature, with the planning attributes a map
/// layer keys off carried as properties.
pub fn area_to_feature(area: &SearchArea) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".into(), area.id.into());
    properties.insert("mode".into(), serde_json::json!(area.mode));
    properties.insert("priority".into(), area.priority.into());
    properties.insert("containment".into(), area.containment.into());
    properties.insert("area_nm2".into(), area.area_nm2.into());
    properties.insert(
        "center".into(),
        serde_json::json!([area.center.lon_deg, area.center.lat_deg]),
    );

    Feature {
        bbox: None,
        geometry: Some(boundary_geometry(area)),
        id: Some(geojson::feature::Id::Number(area.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// An area's sub-areas as GeoJSON features, tagged with the parent id.
pub fn sub_areas_to_features(area: &SearchArea) -> Vec<Feature> {
    area.sub_areas
        .iter()
        .map(|sub| sub_area_to_feature(area.id, sub))
        .collect()
}

fn sub_area_to_feature(parent_id: u32, sub: &SubArea) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("parent_id".into(), parent_id.into());
    properties.insert("id".into(), sub.id.into());
    properties.insert("area_nm2".into(), sub.area_nm2.into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring_coordinates(
            &sub.boundary,
        )]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Several areas as one feature collection, in input order.
pub fn areas_to_collection(areas: &[SearchArea]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: areas.iter().map(area_to_feature).collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::{single_point, AreaOptions};

    #[test]
    fn test_area_feature_roundtrip() {
        let datum = GeoPosition::new(59.0, 21.0).unwrap();
        let area = single_point(datum, 10.0, &AreaOptions::default()).unwrap();
        let feature = area_to_feature(&area);

        let json = serde_json::to_string(&feature).unwrap();
        let back: Feature = serde_json::from_str(&json).unwrap();
        let geometry = back.geometry.unwrap();
        match geometry.value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                // closed ring, longitude first
                assert_eq!(rings[0].len(), area.boundary.len());
                assert_eq!(rings[0].first(), rings[0].last());
                assert!((rings[0][0][0] - area.boundary[0].lon_deg).abs() < 1e-12);
                assert!((rings[0][0][1] - area.boundary[0].lat_deg).abs() < 1e-12);
            }
            other => panic!("expected polygon, got {other:?}"),
        }

        let properties = back.properties.unwrap();
        assert_eq!(properties["mode"], "single_point");
        assert_eq!(properties["priority"], 1);
    }

    #[test]
    fn test_collection_and_sub_areas() {
        let datum = GeoPosition::new(59.0, 21.0).unwrap();
        let area = single_point(datum, 25.0, &AreaOptions::default()).unwrap();

        let collection = areas_to_collection(std::slice::from_ref(&area));
        assert_eq!(collection.features.len(), 1);

        let subs = sub_areas_to_features(&area);
        assert_eq!(subs.len(), area.sub_areas.len());
        let properties = subs[0].properties.as_ref().unwrap();
        assert_eq!(properties["parent_id"], 1);
        assert_eq!(properties["id"], 1);
    }
}
