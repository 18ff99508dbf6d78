//! Shapefile shape type definitions and utilities
//!
//! This module provides the registry of numeric shape type codes used by
//! the ESRI shapefile format, loaded from the bundled definitions file.

use std::collections::HashMap;
use std::fs;
use lazy_static::lazy_static;
use crate::geojson::errors::{GeoError, GeoResult};

lazy_static! {
    // Parse the TOML file at startup
    static ref SHAPE_DEFINITIONS: ShapeDefinitions = {
        let content = include_str!("../../shape_types.toml");
        ShapeDefinitions::from_str(content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse shape type definitions: {}", e);
                ShapeDefinitions::default()
            })
    };
}

/// Container for shape type definitions
#[derive(Debug, Default)]
pub struct ShapeDefinitions {
    // Maps shapefile shape type codes to names
    pub shape_type_names: HashMap<i32, String>,
}

impl ShapeDefinitions {
    /// Parse shape definitions from a TOML string
    pub fn from_str(content: &str) -> GeoResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(GeoError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut defs = ShapeDefinitions::default();

        // Parse shape type codes
        if let Some(table) = toml_value.get("shape_type_codes").and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(code), Some(name)) = (k.parse::<i32>(), v.as_str()) {
                    defs.shape_type_names.insert(code, name.to_string());
                }
            }
        }

        Ok(defs)
    }

    /// Load shape definitions from a TOML file
    pub fn from_file(path: &str) -> GeoResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return Err(GeoError::IoError(e)),
        };

        Self::from_str(&contents)
    }

    /// Get a shape type name by code
    pub fn get_shape_type_name(&self, code: i32) -> String {
        self.shape_type_names.get(&code)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", code))
    }
}

// Shapefile shape type constants (ESRI Shapefile Technical Description)
pub const SHAPE_NULL: i32 = 0;
pub const SHAPE_POINT: i32 = 1;
pub const SHAPE_POLYLINE: i32 = 3;
pub const SHAPE_POLYGON: i32 = 5;
pub const SHAPE_MULTIPOINT: i32 = 8;
pub const SHAPE_POINT_Z: i32 = 11;
pub const SHAPE_POLYLINE_Z: i32 = 13;
pub const SHAPE_POLYGON_Z: i32 = 15;
pub const SHAPE_MULTIPOINT_Z: i32 = 18;
pub const SHAPE_POINT_M: i32 = 21;
pub const SHAPE_POLYLINE_M: i32 = 23;
pub const SHAPE_POLYGON_M: i32 = 25;
pub const SHAPE_MULTIPOINT_M: i32 = 28;

/// Get a shape type name by code
pub fn get_shape_type_name(code: i32) -> String {
    SHAPE_DEFINITIONS.get_shape_type_name(code)
}
