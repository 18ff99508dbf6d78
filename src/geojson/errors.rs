//! Custom error types for geographic document processing

use std::fmt;
use std::io;

/// Geographic document processing error types
#[derive(Debug)]
pub enum GeoError {
    /// I/O error
    IoError(io::Error),
    /// File extension is not one of the supported upload formats
    InvalidExtension(String),
    /// The `type` discriminator is missing or not a recognized geometry kind
    UnsupportedGeometry(String),
    /// A GeometryCollection or FeatureCollection held zero members
    EmptyCollection(&'static str),
    /// Document structure does not match its declared geometry kind
    MalformedDocument(String),
    /// Shapefile header or record stream is corrupt
    InvalidShapefile(String),
    /// Shapefile record uses a shape type code we cannot convert
    UnsupportedShapeType(i32),
    /// Zip archive structure is corrupt or holds no usable entry
    InvalidArchive(String),
    /// Zip entry uses a compression method other than stored or deflate
    UnsupportedCompression(u16),
    /// XML parse error from the KML reader
    XmlError(quick_xml::Error),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::IoError(e) => write!(f, "I/O error: {}", e),
            GeoError::InvalidExtension(ext) => write!(
                f, "Invalid file extension '{}'. Upload .shp, .kml or .zip files", ext),
            GeoError::UnsupportedGeometry(tag) => write!(
                f, "Unsupported geometry type '{}' (corrupted SHP/KML/ZIP file)", tag),
            GeoError::EmptyCollection(kind) => write!(f, "{} empty in file", kind),
            GeoError::MalformedDocument(msg) => write!(f, "Malformed document: {}", msg),
            GeoError::InvalidShapefile(msg) => write!(f, "Invalid shapefile: {}", msg),
            GeoError::UnsupportedShapeType(code) => write!(
                f, "Unsupported shape type code: {} ({})",
                code, crate::convert::shape_codes::get_shape_type_name(*code)),
            GeoError::InvalidArchive(msg) => write!(f, "Invalid zip archive: {}", msg),
            GeoError::UnsupportedCompression(method) => write!(
                f, "Unsupported zip compression method: {}", method),
            GeoError::XmlError(e) => write!(f, "XML error: {}", e),
            GeoError::GenericError(msg) => write!(f, "Geo error: {}", msg),
        }
    }
}

impl std::error::Error for GeoError {}

impl From<io::Error> for GeoError {
    fn from(error: io::Error) -> Self {
        GeoError::IoError(error)
    }
}

impl From<String> for GeoError {
    fn from(msg: String) -> Self {
        GeoError::GenericError(msg)
    }
}

impl From<quick_xml::Error> for GeoError {
    fn from(error: quick_xml::Error) -> Self {
        GeoError::XmlError(error)
    }
}

/// Result type for geographic document operations
pub type GeoResult<T> = Result<T, GeoError>;
