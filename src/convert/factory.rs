//! Factory for creating format handlers

use std::fs;
use std::path::Path;

use log::info;

use crate::geojson::errors::{GeoError, GeoResult};
use crate::geojson::GeoDocument;
use super::handler::FormatHandler;
use super::kml::KmlHandler;
use super::shapefile::ShapefileHandler;
use super::zip::ZipHandler;

/// Factory for creating format handlers
pub struct FormatFactory;

impl FormatFactory {
    /// Create a format handler for the given file extension
    ///
    /// The extension comparison is case-insensitive. Anything outside the
    /// supported set is rejected before any file content is inspected.
    pub fn create_handler(extension: &str) -> GeoResult<Box<dyn FormatHandler>> {
        match extension.to_lowercase().as_str() {
            "shp" => Ok(Box::new(ShapefileHandler)),
            "kml" => Ok(Box::new(KmlHandler)),
            "zip" => Ok(Box::new(ZipHandler)),
            other => Err(GeoError::InvalidExtension(other.to_string())),
        }
    }

    /// Get all available format handlers
    pub fn get_available_handlers() -> Vec<Box<dyn FormatHandler>> {
        vec![
            Box::new(ShapefileHandler),
            Box::new(KmlHandler),
            Box::new(ZipHandler),
        ]
    }
}

/// Convert a raw file payload with a known extension into a document
///
/// # Arguments
/// * `data` - Raw file content
/// * `extension` - Lowercase-insensitive file extension without the dot
///
/// # Returns
/// The converted document or an error
pub fn convert_buffer(data: &[u8], extension: &str) -> GeoResult<GeoDocument> {
    let handler = FormatFactory::create_handler(extension)?;
    info!("Converting {} payload ({} bytes)", handler.name(), data.len());
    handler.convert(data)
}

/// Read a file from disk and convert it based on its extension
///
/// # Arguments
/// * `path` - Path to the input file
///
/// # Returns
/// The converted document or an error
pub fn convert_file(path: &str) -> GeoResult<GeoDocument> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| GeoError::InvalidExtension("(none)".to_string()))?
        .to_string();

    info!("Reading input file: {}", path);
    let data = fs::read(path)?;
    convert_buffer(&data, &extension)
}
