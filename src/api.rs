use log::info;

use crate::convert::{self, FormatFactory};
use crate::coordinate::CoordinateSequence;
use crate::extractor::CoordinateExtractor;
use crate::geojson::errors::GeoResult;
use crate::plan::{FlightPlan, DEFAULT_PLAN_NAME};
use crate::utils::logger::Logger;

/// Main interface to the FlightKit library
pub struct FlightKit {
    logger: Logger,
}

impl FlightKit {
    /// Create a new FlightKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "flightkit.log"
    ///
    /// # Returns
    /// A FlightKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> GeoResult<Self> {
        let log_path = log_file.unwrap_or("flightkit.log");
        let logger = Logger::new(log_path)?;
        Ok(FlightKit { logger })
    }

    /// Analyze a geographic file and return information about its structure
    ///
    /// # Arguments
    /// * `input_path` - Path to the file to analyze (.shp, .kml or .zip)
    ///
    /// # Returns
    /// String containing analysis information or an error
    pub fn analyze(&self, input_path: &str) -> GeoResult<String> {
        let document = convert::convert_file(input_path)?;

        // Format a summary of the document
        let mut result = format!("Geographic File Analysis Results:\n");
        result.push_str(&format!("  Kind: {}\n", document.kind_name()));
        result.push_str(&format!("  Geometries: {}\n", document.geometry_count()));
        result.push_str(&format!("  Vertices: {}\n", document.vertex_count()));

        if let Some((min_lng, min_lat, max_lng, max_lat)) = document.bounds() {
            result.push_str(&format!("  Longitude range: [{}, {}]\n", min_lng, max_lng));
            result.push_str(&format!("  Latitude range: [{}, {}]\n", min_lat, max_lat));
        }

        // Show what a flight plan built from this file would hold
        let extractor = CoordinateExtractor::new();
        match extractor.extract(&document) {
            Ok(sequence) => {
                result.push_str(&format!("  Flight path coordinates: {}\n", sequence.len()));
            }
            Err(e) => {
                result.push_str(&format!("  Flight path extraction would fail: {}\n", e));
            }
        }

        self.logger.log(&result)?;
        Ok(result)
    }

    /// Extract a flight plan from a geographic file and write it out
    ///
    /// # Arguments
    /// * `input_path` - Path to the input file (.shp, .kml or .zip)
    /// * `output_path` - Path where to save the plan
    /// * `plan_name` - Optional plan name, defaults to "New Plan"
    /// * `format` - Output format, "json" or "csv"
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn extract(
        &self,
        input_path: &str,
        output_path: &str,
        plan_name: Option<&str>,
        format: &str,
    ) -> GeoResult<()> {
        let sequence = self.extract_to_buffer(input_path)?;
        let plan = FlightPlan::new(plan_name.unwrap_or(DEFAULT_PLAN_NAME), sequence);
        plan.write(output_path, format)
    }

    /// Extract the flight path coordinates from a geographic file to memory
    ///
    /// # Arguments
    /// * `input_path` - Path to the input file (.shp, .kml or .zip)
    ///
    /// # Returns
    /// Result containing the ordered coordinate sequence or an error
    pub fn extract_to_buffer(&self, input_path: &str) -> GeoResult<CoordinateSequence> {
        info!("Extracting flight path from {}", input_path);

        let document = convert::convert_file(input_path)?;
        let extractor = CoordinateExtractor::new();
        let sequence = extractor.extract(&document)?;

        info!("Extracted {} coordinates", sequence.len());
        self.logger.log(&format!(
            "Extracted {} coordinates from {}",
            sequence.len(),
            input_path
        ))?;
        Ok(sequence)
    }

    /// List supported input formats
    ///
    /// # Returns
    /// Vector of format names
    pub fn list_supported_formats(&self) -> Vec<String> {
        let handlers = FormatFactory::get_available_handlers();
        handlers.iter().map(|h| h.name().to_string()).collect()
    }
}
