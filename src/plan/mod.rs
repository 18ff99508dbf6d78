//! Flight plan output
//!
//! This module packages an extracted coordinate sequence under a plan
//! name and writes it out for the plan-update consumer, as JSON or CSV.

use std::fmt::Write as FmtWrite;
use std::fs;

use log::info;
use serde::{Deserialize, Serialize};

use crate::coordinate::CoordinateSequence;
use crate::geojson::errors::{GeoError, GeoResult};

/// Plan name used when the caller does not provide one
pub const DEFAULT_PLAN_NAME: &str = "New Plan";

/// A named flight plan built from an extracted coordinate sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Plan name shown to the consumer
    pub name: String,
    /// Ordered flight path coordinates
    pub geometry: CoordinateSequence,
}

impl FlightPlan {
    /// Create a plan from a name and an extracted sequence
    pub fn new(name: &str, geometry: CoordinateSequence) -> Self {
        FlightPlan {
            name: name.to_string(),
            geometry,
        }
    }

    /// Number of coordinates in the flight path
    pub fn vertex_count(&self) -> usize {
        self.geometry.len()
    }

    /// Serialize the plan as pretty-printed JSON
    pub fn to_json_string(&self) -> GeoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GeoError::GenericError(format!("Failed to serialize plan: {}", e)))
    }

    /// Serialize the coordinate sequence as CSV with a header row
    pub fn to_csv_string(&self) -> String {
        let mut out = String::from("lat,lng\n");
        for coordinate in &self.geometry {
            // Infallible for String targets
            let _ = writeln!(out, "{},{}", coordinate.lat, coordinate.lng);
        }
        out
    }

    /// Write the plan to a file in the requested format
    ///
    /// # Arguments
    /// * `output_path` - Path to write
    /// * `format` - Output format, "json" or "csv"
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn write(&self, output_path: &str, format: &str) -> GeoResult<()> {
        let content = match format.to_lowercase().as_str() {
            "json" => self.to_json_string()?,
            "csv" => self.to_csv_string(),
            other => {
                return Err(GeoError::GenericError(format!(
                    "Unknown plan output format: {}",
                    other
                )))
            }
        };

        info!(
            "Writing plan '{}' ({} coordinates) to {} as {}",
            self.name,
            self.vertex_count(),
            output_path,
            format
        );
        fs::write(output_path, content)?;
        Ok(())
    }
}
