//! Tests for the shapefile reader

extern crate std;

use crate::convert::shapefile::ShapefileReader;
use crate::coordinate::LatLng;
use crate::extractor::CoordinateExtractor;
use crate::geojson::errors::GeoError;
use crate::geojson::GeoDocument;
use super::test_utils::{
    build_shapefile, multipoint_content, null_content, point_content, point_z_content,
    poly_content,
};

#[test]
fn test_point_records() {
    let buffer = build_shapefile(1, &[point_content(10.0, 20.0), point_content(30.0, 40.0)]);

    let document = ShapefileReader::new().read(&buffer).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => {
            std::assert_eq!(features.len(), 2);
            std::assert_eq!(*features[0].geometry, GeoDocument::Point([10.0, 20.0]));
            std::assert_eq!(*features[1].geometry, GeoDocument::Point([30.0, 40.0]));
        }
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }

    // Longitude/latitude come out swapped into lat/lng fields
    let sequence = CoordinateExtractor::new().extract(&document).unwrap();
    std::assert_eq!(sequence, vec![LatLng::new(20.0, 10.0), LatLng::new(40.0, 30.0)]);
}

#[test]
fn test_multipoint_record() {
    let buffer = build_shapefile(8, &[multipoint_content(&[(1.0, 2.0), (3.0, 4.0)])]);

    let document = ShapefileReader::new().read(&buffer).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => {
            std::assert_eq!(features.len(), 1);
            std::assert_eq!(
                *features[0].geometry,
                GeoDocument::LineString(vec![[1.0, 2.0], [3.0, 4.0]])
            );
        }
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }
}

#[test]
fn test_polyline_parts_are_flattened() {
    let parts: [&[(f64, f64)]; 2] = [
        &[(0.0, 0.0), (1.0, 1.0)],
        &[(5.0, 5.0), (6.0, 6.0)],
    ];
    let buffer = build_shapefile(3, &[poly_content(3, &parts)]);

    let document = ShapefileReader::new().read(&buffer).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => {
            std::assert_eq!(
                *features[0].geometry,
                GeoDocument::LineString(vec![
                    [0.0, 0.0],
                    [1.0, 1.0],
                    [5.0, 5.0],
                    [6.0, 6.0],
                ])
            );
        }
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }
}

#[test]
fn test_polygon_record_keeps_rings() {
    let rings: [&[(f64, f64)]; 2] = [
        &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)],
        &[(2.0, 2.0), (3.0, 2.0), (3.0, 3.0), (2.0, 2.0)],
    ];
    let buffer = build_shapefile(5, &[poly_content(5, &rings)]);

    let document = ShapefileReader::new().read(&buffer).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => match features[0].geometry.as_ref() {
            GeoDocument::Polygon(rings) => {
                std::assert_eq!(rings.len(), 2);
                std::assert_eq!(rings[0].len(), 4);
            }
            other => std::panic!("expected Polygon, got {:?}", other),
        },
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }

    // Extraction consumes the outer ring and appends its closing point
    let sequence = CoordinateExtractor::new().extract(&document).unwrap();
    std::assert_eq!(sequence.len(), 5);
    std::assert_eq!(sequence[4], sequence[0]);
}

#[test]
fn test_null_records_are_skipped() {
    let buffer = build_shapefile(1, &[null_content(), point_content(7.0, 8.0)]);

    let document = ShapefileReader::new().read(&buffer).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => std::assert_eq!(features.len(), 1),
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }
}

#[test]
fn test_point_z_record_reads_xy_only() {
    let buffer = build_shapefile(11, &[point_z_content(10.0, 20.0, 300.0, 7.0)]);

    let document = ShapefileReader::new().read(&buffer).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => {
            std::assert_eq!(*features[0].geometry, GeoDocument::Point([10.0, 20.0]));
        }
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }
}

#[test]
fn test_bad_file_code_fails() {
    let mut buffer = build_shapefile(1, &[point_content(1.0, 2.0)]);
    buffer[..4].copy_from_slice(&1234i32.to_be_bytes());

    let result = ShapefileReader::new().read(&buffer);
    std::assert!(matches!(result, Err(GeoError::InvalidShapefile(_))));
}

#[test]
fn test_truncated_record_fails() {
    let mut buffer = build_shapefile(1, &[point_content(1.0, 2.0)]);
    buffer.truncate(buffer.len() - 8);

    let result = ShapefileReader::new().read(&buffer);
    std::assert!(matches!(result, Err(GeoError::InvalidShapefile(_))));
}

#[test]
fn test_unknown_shape_type_fails() {
    // MultiPatch (31) has no document counterpart
    let mut content = Vec::new();
    content.extend_from_slice(&31i32.to_le_bytes());
    let buffer = build_shapefile(31, &[content]);

    let result = ShapefileReader::new().read(&buffer);
    match result {
        Err(GeoError::UnsupportedShapeType(code)) => std::assert_eq!(code, 31),
        other => std::panic!("expected UnsupportedShapeType, got {:?}", other),
    }
}

#[test]
fn test_empty_shapefile_yields_empty_collection() {
    let buffer = build_shapefile(1, &[]);

    let document = ShapefileReader::new().read(&buffer).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => std::assert!(features.is_empty()),
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }

    // The emptiness signal fires at extraction, not conversion
    let result = CoordinateExtractor::new().extract(&document);
    std::assert!(matches!(result, Err(GeoError::EmptyCollection(_))));
}
