//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod extract_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use extract_command::ExtractCommand;

use clap::ArgMatches;
use crate::geojson::errors::GeoResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct FlightkitCommandFactory;

impl FlightkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        FlightkitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for FlightkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> GeoResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("extract") {
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}
