//! GeoJSON-shaped document module
//!
//! This module provides the document model produced by the format
//! converters and consumed by the coordinate extractor, together with
//! the error taxonomy shared across the crate.

pub mod document;
pub mod errors;
mod tests;

pub use document::{Feature, GeoDocument};
pub use errors::{GeoError, GeoResult};
