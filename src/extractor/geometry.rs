//! Recursive coordinate extraction from geographic documents
//!
//! This module implements the extractor that walks a document's geometry
//! kind and produces the flat, ordered coordinate sequence a flight plan
//! consumer expects.

use log::debug;
use serde_json::Value;

use crate::coordinate::{CoordinateSequence, LatLng, RawCoordinate};
use crate::geojson::errors::{GeoError, GeoResult};
use crate::geojson::{Feature, GeoDocument};

/// Extractor for flat coordinate sequences
///
/// Extraction is all-or-nothing: a failure at any recursion depth
/// propagates unchanged to the caller and no partial sequence is
/// returned. The extractor reads only its argument and allocates only
/// the output, so calls are independent and reentrant.
pub struct CoordinateExtractor;

impl CoordinateExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        CoordinateExtractor
    }

    /// Extract the ordered coordinate sequence from a parsed document
    ///
    /// # Arguments
    /// * `document` - The document to walk
    ///
    /// # Returns
    /// The normalized coordinate sequence, or [`GeoError::EmptyCollection`]
    /// when a collection anywhere in the tree holds zero members
    pub fn extract(&self, document: &GeoDocument) -> GeoResult<CoordinateSequence> {
        match document {
            GeoDocument::Point(pair) => Ok(self.extract_point(pair)),
            GeoDocument::LineString(points) => Ok(self.extract_sequence(points)),
            GeoDocument::Polygon(rings) => Ok(self.extract_polygon(rings)),
            GeoDocument::GeometryCollection(members) => self.extract_geometry_collection(members),
            GeoDocument::Feature(feature) => self.extract(&feature.geometry),
            GeoDocument::FeatureCollection(features) => self.extract_feature_collection(features),
        }
    }

    /// Parse a JSON value into a document and extract its coordinates
    ///
    /// Combined entry point for callers holding untyped JSON; an
    /// unrecognized or missing `type` tag anywhere in the tree fails with
    /// [`GeoError::UnsupportedGeometry`] before extraction begins.
    ///
    /// # Arguments
    /// * `value` - JSON value shaped like a GeoJSON document
    ///
    /// # Returns
    /// The normalized coordinate sequence or the first error found
    pub fn extract_value(&self, value: &Value) -> GeoResult<CoordinateSequence> {
        let document = GeoDocument::from_value(value)?;
        self.extract(&document)
    }

    /// Wrap the single raw pair of a Point as a one-element sequence
    fn extract_point(&self, pair: &RawCoordinate) -> CoordinateSequence {
        vec![LatLng::from_raw(pair)]
    }

    /// Normalize every raw pair in a flat sequence, preserving order
    fn extract_sequence(&self, points: &[RawCoordinate]) -> CoordinateSequence {
        points.iter().map(LatLng::from_raw).collect()
    }

    /// Extract the outer boundary of a Polygon and close the ring
    ///
    /// Only the first ring is consumed; inner rings are holes and do not
    /// contribute to a flight path. The closing point is appended
    /// unconditionally, so an input ring that already closes itself comes
    /// out with a duplicate final vertex. That duplicate is accepted
    /// upstream behavior, not something to deduplicate here.
    fn extract_polygon(&self, rings: &[Vec<RawCoordinate>]) -> CoordinateSequence {
        let outer = rings.first().map(Vec::as_slice).unwrap_or(&[]);
        let mut sequence = self.extract_sequence(outer);

        if let Some(first) = sequence.first().copied() {
            sequence.push(first);
        }

        sequence
    }

    /// Recursively extract every member of a GeometryCollection, in order
    fn extract_geometry_collection(
        &self,
        members: &[GeoDocument],
    ) -> GeoResult<CoordinateSequence> {
        if members.is_empty() {
            return Err(GeoError::EmptyCollection("Geometry Collection"));
        }

        debug!("Extracting GeometryCollection with {} members", members.len());

        let mut sequence = CoordinateSequence::new();
        for member in members {
            sequence.extend(self.extract(member)?);
        }
        Ok(sequence)
    }

    /// Recursively extract every feature's geometry, in order
    fn extract_feature_collection(&self, features: &[Feature]) -> GeoResult<CoordinateSequence> {
        if features.is_empty() {
            return Err(GeoError::EmptyCollection("Feature Collection"));
        }

        debug!("Extracting FeatureCollection with {} features", features.len());

        let mut sequence = CoordinateSequence::new();
        for feature in features {
            sequence.extend(self.extract(&feature.geometry)?);
        }
        Ok(sequence)
    }
}
