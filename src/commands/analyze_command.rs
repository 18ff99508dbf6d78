//! Geographic file structure analysis command
//!
//! This module implements the command for analyzing and displaying
//! the structure of shapefile, KML and zipped geographic files.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::convert;
use crate::extractor::CoordinateExtractor;
use crate::geojson::errors::{GeoError, GeoResult};
use crate::geojson::GeoDocument;
use crate::utils::logger::Logger;

/// Command for analyzing geographic file structure
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> GeoResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| GeoError::GenericError("Missing input file".to_string()))?
            .clone();

        let verbose = args.get_flag("verbose");

        Ok(AnalyzeCommand {
            input_file,
            verbose,
            logger,
        })
    }

    /// Display basic document information
    ///
    /// Shows the geometry kind, counts, and geographic bounds.
    ///
    /// # Arguments
    /// * `document` - The document to analyze
    fn display_document_summary(&self, document: &GeoDocument) {
        info!("Geographic File Analysis Results:");
        info!("  Kind: {}", document.kind_name());
        info!("  Geometries: {}", document.geometry_count());
        info!("  Vertices: {}", document.vertex_count());

        if let Some((min_lng, min_lat, max_lng, max_lat)) = document.bounds() {
            info!("  Longitude range: [{}, {}]", min_lng, max_lng);
            info!("  Latitude range: [{}, {}]", min_lat, max_lat);
        } else {
            info!("  Bounds: Not available");
        }
    }

    /// Display what extraction would produce for this document
    ///
    /// Runs the extractor and reports the flight path length, or the
    /// corruption signal that would stop an extraction.
    ///
    /// # Arguments
    /// * `document` - The document to analyze
    fn display_extraction_info(&self, document: &GeoDocument) {
        let extractor = CoordinateExtractor::new();
        match extractor.extract(document) {
            Ok(sequence) => {
                info!("  Flight path coordinates: {}", sequence.len());

                if self.verbose {
                    let _ = self.logger.print_coordinate_sequence(&sequence);
                }
            }
            Err(e) => {
                info!("  Flight path extraction would fail: {}", e);
            }
        }
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> GeoResult<()> {
        info!("Analyzing file: {}", self.input_file);

        let document = convert::convert_file(&self.input_file)?;

        self.display_document_summary(&document);
        self.display_extraction_info(&document);

        Ok(())
    }
}
