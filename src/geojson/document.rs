//! GeoJSON-shaped document structures
//!
//! This module defines the closed tagged-union document model that the
//! format converters produce and the coordinate extractor consumes, plus
//! the dispatch that builds it from untyped JSON values.

use std::fmt;

use serde_json::Value;

use crate::coordinate::RawCoordinate;
use crate::geojson::errors::{GeoError, GeoResult};

/// A feature wrapper exposing a nested geometry document
///
/// Features coming out of the converters carry their original attribute
/// table (shapefile DBF fields are not read, so this is usually empty for
/// shapefiles, and KML placemark names for KML).
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// The wrapped geometry
    pub geometry: Box<GeoDocument>,
    /// Original feature properties, if any survived conversion
    pub properties: Option<Value>,
}

impl Feature {
    /// Wrap a geometry document in a feature with no properties
    pub fn new(geometry: GeoDocument) -> Self {
        Feature {
            geometry: Box::new(geometry),
            properties: None,
        }
    }

    /// Parse a feature out of a JSON value
    ///
    /// Only the `geometry` field matters for extraction; the member's own
    /// `type` tag is not inspected, matching how upstream consumers walk
    /// `features[i].geometry` directly.
    pub fn from_value(value: &Value) -> GeoResult<Self> {
        let geometry = value
            .get("geometry")
            .ok_or_else(|| GeoError::MalformedDocument("feature has no geometry field".to_string()))?;

        Ok(Feature {
            geometry: Box::new(GeoDocument::from_value(geometry)?),
            properties: value.get("properties").cloned(),
        })
    }
}

/// A parsed geographic document, identified in JSON by its `type` tag
///
/// The six recognized tags map onto five payload shapes: `MultiPoint`
/// parses into `LineString`, since both are a flat pair sequence with no
/// ring semantics. Anything else is rejected with
/// [`GeoError::UnsupportedGeometry`] at construction, which keeps every
/// downstream match exhaustive.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoDocument {
    /// A single raw coordinate pair
    Point(RawCoordinate),
    /// An ordered sequence of raw coordinate pairs (also `MultiPoint`)
    LineString(Vec<RawCoordinate>),
    /// An ordered sequence of linear rings; the first ring is the outer boundary
    Polygon(Vec<Vec<RawCoordinate>>),
    /// An ordered sequence of nested geometry documents
    GeometryCollection(Vec<GeoDocument>),
    /// A lone feature wrapping one geometry
    Feature(Feature),
    /// An ordered sequence of feature wrappers
    FeatureCollection(Vec<Feature>),
}

impl GeoDocument {
    /// Build a document from an untyped JSON value
    ///
    /// Dispatches on the `type` discriminator. Collection members are
    /// parsed recursively, so an unrecognized tag anywhere in the tree
    /// surfaces here.
    ///
    /// # Arguments
    /// * `value` - JSON value shaped like a GeoJSON document
    ///
    /// # Returns
    /// The parsed document, or an error describing the first problem found
    pub fn from_value(value: &Value) -> GeoResult<GeoDocument> {
        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| GeoError::UnsupportedGeometry("(missing type tag)".to_string()))?;

        match tag {
            "Point" => Ok(GeoDocument::Point(parse_pair(coordinates_of(value)?)?)),
            "LineString" | "MultiPoint" => {
                Ok(GeoDocument::LineString(parse_sequence(coordinates_of(value)?)?))
            }
            "Polygon" => {
                let rings = parse_rings(coordinates_of(value)?)?;
                if rings.is_empty() {
                    return Err(GeoError::MalformedDocument("Polygon has no rings".to_string()));
                }
                Ok(GeoDocument::Polygon(rings))
            }
            "GeometryCollection" => {
                let members = value
                    .get("geometries")
                    .and_then(|g| g.as_array())
                    .ok_or_else(|| {
                        GeoError::MalformedDocument("GeometryCollection has no geometries array".to_string())
                    })?;
                let parsed = members
                    .iter()
                    .map(GeoDocument::from_value)
                    .collect::<GeoResult<Vec<_>>>()?;
                Ok(GeoDocument::GeometryCollection(parsed))
            }
            "Feature" => Ok(GeoDocument::Feature(Feature::from_value(value)?)),
            "FeatureCollection" => {
                let members = value
                    .get("features")
                    .and_then(|f| f.as_array())
                    .ok_or_else(|| {
                        GeoError::MalformedDocument("FeatureCollection has no features array".to_string())
                    })?;
                let parsed = members
                    .iter()
                    .map(Feature::from_value)
                    .collect::<GeoResult<Vec<_>>>()?;
                Ok(GeoDocument::FeatureCollection(parsed))
            }
            other => Err(GeoError::UnsupportedGeometry(other.to_string())),
        }
    }

    /// Name of this document's geometry kind, as it appears in the type tag
    pub fn kind_name(&self) -> &'static str {
        match self {
            GeoDocument::Point(_) => "Point",
            GeoDocument::LineString(_) => "LineString",
            GeoDocument::Polygon(_) => "Polygon",
            GeoDocument::GeometryCollection(_) => "GeometryCollection",
            GeoDocument::Feature(_) => "Feature",
            GeoDocument::FeatureCollection(_) => "FeatureCollection",
        }
    }

    /// Number of leaf geometries in the document tree
    pub fn geometry_count(&self) -> usize {
        match self {
            GeoDocument::Point(_) | GeoDocument::LineString(_) | GeoDocument::Polygon(_) => 1,
            GeoDocument::GeometryCollection(members) => {
                members.iter().map(GeoDocument::geometry_count).sum()
            }
            GeoDocument::Feature(feature) => feature.geometry.geometry_count(),
            GeoDocument::FeatureCollection(features) => {
                features.iter().map(|f| f.geometry.geometry_count()).sum()
            }
        }
    }

    /// Total number of raw coordinate pairs in the document tree
    ///
    /// Counts every ring of a polygon, unlike extraction which only
    /// consumes the outer boundary.
    pub fn vertex_count(&self) -> usize {
        match self {
            GeoDocument::Point(_) => 1,
            GeoDocument::LineString(points) => points.len(),
            GeoDocument::Polygon(rings) => rings.iter().map(Vec::len).sum(),
            GeoDocument::GeometryCollection(members) => {
                members.iter().map(GeoDocument::vertex_count).sum()
            }
            GeoDocument::Feature(feature) => feature.geometry.vertex_count(),
            GeoDocument::FeatureCollection(features) => {
                features.iter().map(|f| f.geometry.vertex_count()).sum()
            }
        }
    }

    /// Geographic bounds of all raw pairs as (min_lng, min_lat, max_lng, max_lat)
    ///
    /// Returns None for a document with no vertices.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        self.extend_bounds(&mut bounds);
        bounds
    }

    fn extend_bounds(&self, bounds: &mut Option<(f64, f64, f64, f64)>) {
        match self {
            GeoDocument::Point(pair) => extend_bounds_with(bounds, pair),
            GeoDocument::LineString(points) => {
                for pair in points {
                    extend_bounds_with(bounds, pair);
                }
            }
            GeoDocument::Polygon(rings) => {
                for pair in rings.iter().flatten() {
                    extend_bounds_with(bounds, pair);
                }
            }
            GeoDocument::GeometryCollection(members) => {
                for member in members {
                    member.extend_bounds(bounds);
                }
            }
            GeoDocument::Feature(feature) => feature.geometry.extend_bounds(bounds),
            GeoDocument::FeatureCollection(features) => {
                for feature in features {
                    feature.geometry.extend_bounds(bounds);
                }
            }
        }
    }
}

impl fmt::Display for GeoDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geographic Document:")?;
        writeln!(f, "  Kind: {}", self.kind_name())?;
        writeln!(f, "  Geometries: {}", self.geometry_count())?;
        writeln!(f, "  Vertices: {}", self.vertex_count())?;

        if let Some((min_lng, min_lat, max_lng, max_lat)) = self.bounds() {
            writeln!(
                f,
                "  Bounds: lng [{}, {}], lat [{}, {}]",
                min_lng, max_lng, min_lat, max_lat
            )?;
        }

        Ok(())
    }
}

/// Widen running bounds to cover one raw pair
fn extend_bounds_with(bounds: &mut Option<(f64, f64, f64, f64)>, pair: &RawCoordinate) {
    *bounds = Some(match *bounds {
        None => (pair[0], pair[1], pair[0], pair[1]),
        Some((min_lng, min_lat, max_lng, max_lat)) => (
            min_lng.min(pair[0]),
            min_lat.min(pair[1]),
            max_lng.max(pair[0]),
            max_lat.max(pair[1]),
        ),
    });
}

/// Pull the `coordinates` field out of a geometry value
fn coordinates_of(value: &Value) -> GeoResult<&Value> {
    value
        .get("coordinates")
        .ok_or_else(|| GeoError::MalformedDocument("geometry has no coordinates field".to_string()))
}

/// Parse a single raw `[longitude, latitude]` pair
///
/// A third (altitude) element is tolerated and dropped, since KML-derived
/// documents routinely carry one.
fn parse_pair(value: &Value) -> GeoResult<RawCoordinate> {
    let elements = value
        .as_array()
        .ok_or_else(|| GeoError::MalformedDocument("coordinate pair is not an array".to_string()))?;

    if elements.len() < 2 {
        return Err(GeoError::MalformedDocument(format!(
            "coordinate pair has {} elements, expected at least 2",
            elements.len()
        )));
    }

    let lng = elements[0]
        .as_f64()
        .ok_or_else(|| GeoError::MalformedDocument("coordinate element is not a number".to_string()))?;
    let lat = elements[1]
        .as_f64()
        .ok_or_else(|| GeoError::MalformedDocument("coordinate element is not a number".to_string()))?;

    Ok([lng, lat])
}

/// Parse an ordered sequence of raw pairs
fn parse_sequence(value: &Value) -> GeoResult<Vec<RawCoordinate>> {
    let elements = value
        .as_array()
        .ok_or_else(|| GeoError::MalformedDocument("coordinate sequence is not an array".to_string()))?;

    elements.iter().map(parse_pair).collect()
}

/// Parse an ordered sequence of linear rings
fn parse_rings(value: &Value) -> GeoResult<Vec<Vec<RawCoordinate>>> {
    let elements = value
        .as_array()
        .ok_or_else(|| GeoError::MalformedDocument("ring list is not an array".to_string()))?;

    elements.iter().map(parse_sequence).collect()
}
