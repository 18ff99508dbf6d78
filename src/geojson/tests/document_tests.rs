//! Tests for the document model

extern crate std;

use serde_json::json;

use crate::geojson::errors::GeoError;
use crate::geojson::GeoDocument;

#[test]
fn test_parse_point() {
    let document =
        GeoDocument::from_value(&json!({"type": "Point", "coordinates": [10.0, 20.0]})).unwrap();

    std::assert_eq!(document, GeoDocument::Point([10.0, 20.0]));
    std::assert_eq!(document.kind_name(), "Point");
    std::assert_eq!(document.geometry_count(), 1);
    std::assert_eq!(document.vertex_count(), 1);
}

#[test]
fn test_parse_multipoint_as_linestring() {
    let document = GeoDocument::from_value(&json!({
        "type": "MultiPoint",
        "coordinates": [[1.0, 2.0], [3.0, 4.0]]
    }))
    .unwrap();

    std::assert_eq!(
        document,
        GeoDocument::LineString(vec![[1.0, 2.0], [3.0, 4.0]])
    );
    std::assert_eq!(document.kind_name(), "LineString");
}

#[test]
fn test_parse_polygon_keeps_all_rings() {
    let document = GeoDocument::from_value(&json!({
        "type": "Polygon",
        "coordinates": [
            [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]],
            [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0]]
        ]
    }))
    .unwrap();

    match &document {
        GeoDocument::Polygon(rings) => std::assert_eq!(rings.len(), 2),
        other => std::panic!("expected Polygon, got {:?}", other),
    }
    std::assert_eq!(document.vertex_count(), 6);
}

#[test]
fn test_parse_polygon_without_rings_fails() {
    let result = GeoDocument::from_value(&json!({"type": "Polygon", "coordinates": []}));

    std::assert!(matches!(result, Err(GeoError::MalformedDocument(_))));
}

#[test]
fn test_altitude_element_is_dropped() {
    let document = GeoDocument::from_value(&json!({
        "type": "Point",
        "coordinates": [10.0, 20.0, 150.0]
    }))
    .unwrap();

    std::assert_eq!(document, GeoDocument::Point([10.0, 20.0]));
}

#[test]
fn test_short_coordinate_pair_fails() {
    let result = GeoDocument::from_value(&json!({"type": "Point", "coordinates": [10.0]}));

    std::assert!(matches!(result, Err(GeoError::MalformedDocument(_))));
}

#[test]
fn test_feature_without_geometry_fails() {
    let result = GeoDocument::from_value(&json!({"type": "Feature", "properties": {}}));

    std::assert!(matches!(result, Err(GeoError::MalformedDocument(_))));
}

#[test]
fn test_feature_collection_counts() {
    let document = GeoDocument::from_value(&json!({
        "type": "FeatureCollection",
        "features": [
            {"geometry": {"type": "Point", "coordinates": [1.0, 2.0]}},
            {"geometry": {"type": "LineString", "coordinates": [[3.0, 4.0], [5.0, 6.0]]}}
        ]
    }))
    .unwrap();

    std::assert_eq!(document.kind_name(), "FeatureCollection");
    std::assert_eq!(document.geometry_count(), 2);
    std::assert_eq!(document.vertex_count(), 3);
}

#[test]
fn test_unrecognized_nested_tag_surfaces() {
    let result = GeoDocument::from_value(&json!({
        "type": "GeometryCollection",
        "geometries": [
            {"type": "Point", "coordinates": [1.0, 2.0]},
            {"type": "MultiLineString", "coordinates": [[[1.0, 2.0]]]}
        ]
    }));

    match result {
        Err(GeoError::UnsupportedGeometry(tag)) => std::assert_eq!(tag, "MultiLineString"),
        other => std::panic!("expected UnsupportedGeometry, got {:?}", other),
    }
}

#[test]
fn test_bounds_cover_every_ring() {
    let document = GeoDocument::from_value(&json!({
        "type": "Polygon",
        "coordinates": [
            [[-10.0, -5.0], [10.0, -5.0], [10.0, 5.0]],
            [[-20.0, 0.0], [0.0, 0.0], [0.0, 30.0]]
        ]
    }))
    .unwrap();

    std::assert_eq!(document.bounds(), Some((-20.0, -5.0, 10.0, 30.0)));
}

#[test]
fn test_bounds_of_empty_collection() {
    let document = GeoDocument::from_value(&json!({
        "type": "FeatureCollection",
        "features": []
    }))
    .unwrap();

    std::assert!(document.bounds().is_none());
    std::assert_eq!(document.vertex_count(), 0);
}

#[test]
fn test_display_reports_kind_and_counts() {
    let document =
        GeoDocument::from_value(&json!({"type": "Point", "coordinates": [10.0, 20.0]})).unwrap();
    let text = document.to_string();

    std::assert!(text.contains("Kind: Point"));
    std::assert!(text.contains("Vertices: 1"));
}
