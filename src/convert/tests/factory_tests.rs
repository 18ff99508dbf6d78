//! Tests for the format factory

extern crate std;

use crate::convert::{convert_buffer, FormatFactory};
use crate::geojson::errors::GeoError;
use crate::geojson::GeoDocument;
use super::test_utils::{build_shapefile, point_content};

#[test]
fn test_extension_dispatch_is_case_insensitive() {
    let handler = FormatFactory::create_handler("SHP").unwrap();
    std::assert_eq!(handler.name(), "ESRI Shapefile");

    let handler = FormatFactory::create_handler("Kml").unwrap();
    std::assert_eq!(handler.name(), "KML");
}

#[test]
fn test_unknown_extension_is_rejected() {
    let result = FormatFactory::create_handler("geojson");
    match result {
        Err(GeoError::InvalidExtension(ext)) => std::assert_eq!(ext, "geojson"),
        other => std::panic!("expected InvalidExtension, got {:?}", other.map(|h| h.name())),
    }
}

#[test]
fn test_available_handlers_cover_upload_formats() {
    let handlers = FormatFactory::get_available_handlers();
    let names: Vec<&str> = handlers.iter().map(|h| h.name()).collect();

    std::assert_eq!(names, vec!["ESRI Shapefile", "KML", "Zip archive"]);
}

#[test]
fn test_convert_buffer_dispatches_on_extension() {
    let shapefile = build_shapefile(1, &[point_content(5.0, 6.0)]);

    let document = convert_buffer(&shapefile, "shp").unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => {
            std::assert_eq!(*features[0].geometry, GeoDocument::Point([5.0, 6.0]));
        }
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }

    // The same payload under an unsupported extension never reaches a parser
    let result = convert_buffer(&shapefile, "shx");
    std::assert!(matches!(result, Err(GeoError::InvalidExtension(_))));
}
