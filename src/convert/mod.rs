//! Format conversion from uploaded vector files to documents
//!
//! This module converts the supported upload formats (ESRI shapefile,
//! KML, zip archives bundling either) into the GeoJSON-shaped document
//! model, dispatching on the file extension using a strategy pattern.

mod factory;
mod handler;
pub mod kml;
pub mod shape_codes;
pub mod shapefile;
mod tests;
pub mod zip;

pub use factory::{convert_buffer, convert_file, FormatFactory};
pub use handler::FormatHandler;
pub use kml::KmlReader;
pub use shapefile::ShapefileReader;
pub use zip::ZipReader;
