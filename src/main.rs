use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

// Import from your library
use flightkit::utils::logger::Logger;
use flightkit::commands::{CommandFactory, FlightkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("FlightKit")
        .version("1.0")
        .about("Analyze geographic vector files and extract flight plans")
        .arg(
            Arg::new("input")
                .help("Input file (.shp, .kml or .zip)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extract")
                .short('e')
                .long("extract")
                .help("Extract a flight plan from the file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output plan file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("plan-name")
                .long("plan-name")
                .help("Name recorded in the written plan")
                .value_name("NAME")
                .default_value("New Plan")
                .required(false),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Format for plan output (json, csv)")
                .value_name("FORMAT")
                .default_value("json")
                .required(false),
        )
        .get_matches();

    let log_file = "flightkit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("flightkit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = FlightkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
