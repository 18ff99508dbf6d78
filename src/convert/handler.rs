//! Format handler trait definition

use crate::geojson::errors::GeoResult;
use crate::geojson::GeoDocument;

/// Strategy trait for converting uploaded file formats into documents
pub trait FormatHandler: Send + Sync {
    /// Convert a raw file payload into a geographic document
    fn convert(&self, data: &[u8]) -> GeoResult<GeoDocument>;

    /// Get the name of this file format
    fn name(&self) -> &'static str;

    /// Get the file extensions this handler accepts
    fn extensions(&self) -> &'static [&'static str];
}
