//! Normalized coordinate structure and raw-pair conversion

use serde::{Deserialize, Serialize};

/// A raw coordinate pair as produced by the source format parsers,
/// in `[longitude, latitude]` order
pub type RawCoordinate = [f64; 2];

/// Ordered sequence of normalized coordinates; insertion order encodes
/// path/ring traversal order
pub type CoordinateSequence = Vec<LatLng>;

/// A normalized geographic coordinate
///
/// Field access is order-independent, unlike the raw pairs coming out of
/// the format parsers. This is the sole output element shape of the
/// coordinate extractor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate from explicit latitude and longitude
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    /// Convert a raw `[longitude, latitude]` pair into a normalized coordinate
    ///
    /// This is the only place the element order swap happens. Every handler
    /// that turns raw pairs into output coordinates must go through here;
    /// reading the raw indices anywhere else risks silent lat/lng
    /// transposition.
    pub fn from_raw(raw: &RawCoordinate) -> Self {
        LatLng {
            lat: raw[1],
            lng: raw[0],
        }
    }

    /// Raw `[longitude, latitude]` pair for this coordinate
    pub fn to_raw(&self) -> RawCoordinate {
        [self.lng, self.lat]
    }
}
