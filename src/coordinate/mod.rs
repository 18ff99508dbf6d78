//! Coordinate handling for extracted flight paths
//!
//! This module provides the normalized coordinate representation that
//! every extraction produces, and the single conversion point from the
//! raw pair order used by source file formats.

mod latlng;

// Re-export key types
pub use self::latlng::{CoordinateSequence, LatLng, RawCoordinate};
