//! Tests for the KML reader

extern crate std;

use crate::convert::kml::KmlReader;
use crate::coordinate::LatLng;
use crate::extractor::CoordinateExtractor;
use crate::geojson::errors::GeoError;
use crate::geojson::GeoDocument;

#[test]
fn test_point_placemark() {
    let kml = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Launch site</name>
      <Point>
        <coordinates>10.0,20.0,0</coordinates>
      </Point>
    </Placemark>
  </Document>
</kml>"#;

    let document = KmlReader::new().read(kml.as_bytes()).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => {
            std::assert_eq!(features.len(), 1);
            std::assert_eq!(*features[0].geometry, GeoDocument::Point([10.0, 20.0]));
            let properties = features[0].properties.as_ref().unwrap();
            std::assert_eq!(properties["name"], "Launch site");
        }
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }
}

#[test]
fn test_linestring_placemark() {
    let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2">
  <Placemark>
    <LineString>
      <coordinates>
        0.0,0.0,100 1.0,1.0,100
        2.0,2.0,100
      </coordinates>
    </LineString>
  </Placemark>
</kml>"#;

    let document = KmlReader::new().read(kml.as_bytes()).unwrap();
    let sequence = CoordinateExtractor::new().extract(&document).unwrap();

    std::assert_eq!(
        sequence,
        vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(2.0, 2.0),
        ]
    );
}

#[test]
fn test_polygon_placemark_with_hole() {
    let kml = r#"<kml>
  <Placemark>
    <Polygon>
      <outerBoundaryIs>
        <LinearRing>
          <coordinates>0.0,0.0 10.0,0.0 10.0,10.0 0.0,0.0</coordinates>
        </LinearRing>
      </outerBoundaryIs>
      <innerBoundaryIs>
        <LinearRing>
          <coordinates>2.0,2.0 3.0,2.0 3.0,3.0 2.0,2.0</coordinates>
        </LinearRing>
      </innerBoundaryIs>
    </Polygon>
  </Placemark>
</kml>"#;

    let document = KmlReader::new().read(kml.as_bytes()).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => match features[0].geometry.as_ref() {
            GeoDocument::Polygon(rings) => {
                std::assert_eq!(rings.len(), 2);
                std::assert_eq!(rings[0][0], [0.0, 0.0]);
                std::assert_eq!(rings[1][0], [2.0, 2.0]);
            }
            other => std::panic!("expected Polygon, got {:?}", other),
        },
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }
}

#[test]
fn test_multigeometry_placemark() {
    let kml = r#"<kml>
  <Placemark>
    <MultiGeometry>
      <Point><coordinates>1.0,2.0</coordinates></Point>
      <Point><coordinates>3.0,4.0</coordinates></Point>
    </MultiGeometry>
  </Placemark>
</kml>"#;

    let document = KmlReader::new().read(kml.as_bytes()).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => {
            std::assert_eq!(features.len(), 1);
            std::assert_eq!(
                *features[0].geometry,
                GeoDocument::GeometryCollection(vec![
                    GeoDocument::Point([1.0, 2.0]),
                    GeoDocument::Point([3.0, 4.0]),
                ])
            );
        }
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }

    let sequence = CoordinateExtractor::new().extract(&document).unwrap();
    std::assert_eq!(sequence, vec![LatLng::new(2.0, 1.0), LatLng::new(4.0, 3.0)]);
}

#[test]
fn test_multiple_placemarks_keep_document_order() {
    let kml = r#"<kml>
  <Folder>
    <Placemark><Point><coordinates>1.0,1.0</coordinates></Point></Placemark>
    <Placemark><Point><coordinates>2.0,2.0</coordinates></Point></Placemark>
  </Folder>
  <Placemark><Point><coordinates>3.0,3.0</coordinates></Point></Placemark>
</kml>"#;

    let document = KmlReader::new().read(kml.as_bytes()).unwrap();
    let sequence = CoordinateExtractor::new().extract(&document).unwrap();

    std::assert_eq!(
        sequence,
        vec![
            LatLng::new(1.0, 1.0),
            LatLng::new(2.0, 2.0),
            LatLng::new(3.0, 3.0),
        ]
    );
}

#[test]
fn test_kml_without_placemarks_yields_empty_collection() {
    let kml = r#"<kml><Document><name>Nothing here</name></Document></kml>"#;

    let document = KmlReader::new().read(kml.as_bytes()).unwrap();
    match &document {
        GeoDocument::FeatureCollection(features) => std::assert!(features.is_empty()),
        other => std::panic!("expected FeatureCollection, got {:?}", other),
    }

    let result = CoordinateExtractor::new().extract(&document);
    std::assert!(matches!(result, Err(GeoError::EmptyCollection(_))));
}

#[test]
fn test_bad_coordinate_tuple_fails() {
    let kml = r#"<kml>
  <Placemark>
    <Point><coordinates>not-a-number,20.0</coordinates></Point>
  </Placemark>
</kml>"#;

    let result = KmlReader::new().read(kml.as_bytes());
    std::assert!(matches!(result, Err(GeoError::MalformedDocument(_))));
}

#[test]
fn test_polygon_without_outer_boundary_fails() {
    let kml = r#"<kml>
  <Placemark>
    <Polygon>
      <innerBoundaryIs>
        <LinearRing><coordinates>1.0,1.0 2.0,2.0</coordinates></LinearRing>
      </innerBoundaryIs>
    </Polygon>
  </Placemark>
</kml>"#;

    let result = KmlReader::new().read(kml.as_bytes());
    std::assert!(matches!(result, Err(GeoError::MalformedDocument(_))));
}
