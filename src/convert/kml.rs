//! KML file reading
//!
//! This module implements a streaming KML parser that collects placemark
//! geometries into a FeatureCollection document. Only the geometry
//! vocabulary is interpreted (Point, LineString, Polygon with its
//! boundary rings, MultiGeometry); styling, network links and ground
//! overlays are ignored.

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::json;

use crate::coordinate::RawCoordinate;
use crate::geojson::errors::{GeoError, GeoResult};
use crate::geojson::{Feature, GeoDocument};
use super::handler::FormatHandler;

/// Which polygon boundary a LinearRing belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
enum RingRole {
    Outer,
    Inner,
}

/// Partially built geometry, one per open geometry element
#[derive(Debug)]
enum GeometryBuilder {
    Point {
        coords: Vec<RawCoordinate>,
    },
    LineString {
        coords: Vec<RawCoordinate>,
    },
    Polygon {
        outer: Option<Vec<RawCoordinate>>,
        inners: Vec<Vec<RawCoordinate>>,
        role: RingRole,
        pending_ring: Option<Vec<RawCoordinate>>,
    },
    MultiGeometry {
        members: Vec<GeoDocument>,
    },
}

/// Reader for KML documents
pub struct KmlReader;

impl KmlReader {
    /// Creates a new KML reader
    pub fn new() -> Self {
        KmlReader
    }

    /// Read a KML payload into a document
    ///
    /// Every placemark carrying a geometry becomes one feature, in
    /// document order. The output is always a FeatureCollection, which
    /// extraction rejects as empty when no placemark held a geometry.
    ///
    /// # Arguments
    /// * `data` - Raw KML file content
    ///
    /// # Returns
    /// A FeatureCollection document or an error
    pub fn read(&self, data: &[u8]) -> GeoResult<GeoDocument> {
        let mut reader = Reader::from_reader(data);
        let mut buf = Vec::new();

        let mut features: Vec<Feature> = Vec::new();
        let mut stack: Vec<GeometryBuilder> = Vec::new();
        let mut placemark_geometry: Option<GeoDocument> = None;
        let mut placemark_name: Option<String> = None;

        let mut in_placemark = false;
        let mut in_name = false;
        let mut in_coordinates = false;
        let mut coordinate_text = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(element) => match element.local_name().as_ref() {
                    b"Placemark" => {
                        in_placemark = true;
                        placemark_geometry = None;
                        placemark_name = None;
                    }
                    b"name" if in_placemark && stack.is_empty() => {
                        in_name = true;
                    }
                    b"Point" => stack.push(GeometryBuilder::Point { coords: Vec::new() }),
                    b"LineString" => {
                        stack.push(GeometryBuilder::LineString { coords: Vec::new() })
                    }
                    b"Polygon" => stack.push(GeometryBuilder::Polygon {
                        outer: None,
                        inners: Vec::new(),
                        role: RingRole::Outer,
                        pending_ring: None,
                    }),
                    b"MultiGeometry" => {
                        stack.push(GeometryBuilder::MultiGeometry { members: Vec::new() })
                    }
                    b"outerBoundaryIs" => {
                        if let Some(GeometryBuilder::Polygon { role, .. }) = stack.last_mut() {
                            *role = RingRole::Outer;
                        }
                    }
                    b"innerBoundaryIs" => {
                        if let Some(GeometryBuilder::Polygon { role, .. }) = stack.last_mut() {
                            *role = RingRole::Inner;
                        }
                    }
                    b"coordinates" => {
                        in_coordinates = true;
                        coordinate_text.clear();
                    }
                    _ => {}
                },
                Event::Text(text) => {
                    if in_coordinates {
                        coordinate_text.push_str(&text.unescape()?);
                        coordinate_text.push(' ');
                    } else if in_name {
                        placemark_name = Some(text.unescape()?.trim().to_string());
                    }
                }
                Event::End(element) => match element.local_name().as_ref() {
                    b"Placemark" => {
                        in_placemark = false;
                        if let Some(geometry) = placemark_geometry.take() {
                            let properties =
                                placemark_name.take().map(|name| json!({ "name": name }));
                            let mut feature = Feature::new(geometry);
                            feature.properties = properties;
                            features.push(feature);
                        } else {
                            debug!("Placemark without geometry, skipping");
                        }
                    }
                    b"name" => in_name = false,
                    b"coordinates" => {
                        in_coordinates = false;
                        let coords = parse_coordinate_text(&coordinate_text)?;
                        match stack.last_mut() {
                            Some(GeometryBuilder::Point { coords: target })
                            | Some(GeometryBuilder::LineString { coords: target }) => {
                                *target = coords;
                            }
                            Some(GeometryBuilder::Polygon { pending_ring, .. }) => {
                                *pending_ring = Some(coords);
                            }
                            _ => debug!("Coordinates outside a geometry element, ignoring"),
                        }
                    }
                    b"LinearRing" => {
                        if let Some(GeometryBuilder::Polygon {
                            outer,
                            inners,
                            role,
                            pending_ring,
                        }) = stack.last_mut()
                        {
                            if let Some(ring) = pending_ring.take() {
                                match role {
                                    RingRole::Outer => *outer = Some(ring),
                                    RingRole::Inner => inners.push(ring),
                                }
                            }
                        }
                    }
                    b"Point" | b"LineString" | b"Polygon" | b"MultiGeometry" => {
                        let builder = match stack.pop() {
                            Some(builder) => builder,
                            None => continue,
                        };
                        let geometry = finish_geometry(builder)?;
                        match stack.last_mut() {
                            Some(GeometryBuilder::MultiGeometry { members }) => {
                                members.push(geometry)
                            }
                            _ => placemark_geometry = Some(geometry),
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        debug!("KML produced {} features", features.len());
        Ok(GeoDocument::FeatureCollection(features))
    }
}

/// Turn a completed builder into its document
fn finish_geometry(builder: GeometryBuilder) -> GeoResult<GeoDocument> {
    match builder {
        GeometryBuilder::Point { coords } => {
            let pair = coords.first().copied().ok_or_else(|| {
                GeoError::MalformedDocument("Point placemark has no coordinates".to_string())
            })?;
            Ok(GeoDocument::Point(pair))
        }
        GeometryBuilder::LineString { coords } => Ok(GeoDocument::LineString(coords)),
        GeometryBuilder::Polygon { outer, inners, .. } => {
            let outer = outer.ok_or_else(|| {
                GeoError::MalformedDocument("Polygon has no outer boundary ring".to_string())
            })?;
            let mut rings = Vec::with_capacity(1 + inners.len());
            rings.push(outer);
            rings.extend(inners);
            Ok(GeoDocument::Polygon(rings))
        }
        GeometryBuilder::MultiGeometry { members } => {
            Ok(GeoDocument::GeometryCollection(members))
        }
    }
}

/// Parse a KML coordinates text block
///
/// The block is whitespace-separated `lon,lat[,alt]` tuples; altitude is
/// dropped.
fn parse_coordinate_text(text: &str) -> GeoResult<Vec<RawCoordinate>> {
    let mut points = Vec::new();

    for tuple in text.split_whitespace() {
        let mut elements = tuple.split(',');

        let lng = parse_element(elements.next(), tuple)?;
        let lat = parse_element(elements.next(), tuple)?;

        points.push([lng, lat]);
    }

    Ok(points)
}

fn parse_element(element: Option<&str>, tuple: &str) -> GeoResult<f64> {
    element
        .and_then(|e| e.parse::<f64>().ok())
        .ok_or_else(|| {
            GeoError::MalformedDocument(format!("bad coordinate tuple '{}'", tuple))
        })
}

/// KML format handler
pub struct KmlHandler;

impl FormatHandler for KmlHandler {
    fn convert(&self, data: &[u8]) -> GeoResult<GeoDocument> {
        KmlReader::new().read(data)
    }

    fn name(&self) -> &'static str {
        "KML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["kml"]
    }
}
