//! Flight plan extraction command
//!
//! This module implements the command for converting a geographic file,
//! extracting its flight path coordinates, and writing the resulting
//! plan to disk.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::convert;
use crate::extractor::CoordinateExtractor;
use crate::geojson::errors::{GeoError, GeoResult};
use crate::plan::{FlightPlan, DEFAULT_PLAN_NAME};
use crate::utils::logger::Logger;

/// Command for extracting a flight plan from a geographic file
pub struct ExtractCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Path to the output file
    output_file: String,
    /// Name recorded in the written plan
    plan_name: String,
    /// Format for plan output
    output_format: String,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> GeoResult<Self> {
        info!("Creating new extract command from arguments");

        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| GeoError::GenericError("Missing input file".to_string()))?
            .clone();
        info!("Input file: {}", input_file);

        let output_file = args.get_one::<String>("output")
            .ok_or_else(|| GeoError::GenericError("Missing output file path for extraction".to_string()))?
            .clone();
        info!("Output file: {}", output_file);

        let plan_name = args.get_one::<String>("plan-name")
            .cloned()
            .unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string());
        info!("Plan name: {}", plan_name);

        let output_format = args.get_one::<String>("format")
            .cloned()
            .unwrap_or_else(|| "json".to_string());
        info!("Output format: {}", output_format);

        let verbose = args.get_flag("verbose");

        Ok(ExtractCommand {
            input_file,
            output_file,
            plan_name,
            output_format,
            verbose,
            logger,
        })
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> GeoResult<()> {
        info!("Extracting flight plan from {}", self.input_file);

        let document = convert::convert_file(&self.input_file)?;
        info!(
            "Converted {} with {} geometries",
            document.kind_name(),
            document.geometry_count()
        );

        let extractor = CoordinateExtractor::new();
        let sequence = extractor.extract(&document)?;
        info!("Extracted {} coordinates", sequence.len());

        if self.verbose {
            let _ = self.logger.print_coordinate_sequence(&sequence);
        }

        let plan = FlightPlan::new(&self.plan_name, sequence);
        plan.write(&self.output_file, &self.output_format)?;

        info!("Flight plan written to {}", self.output_file);
        Ok(())
    }
}
