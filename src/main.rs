use clap::{Arg, Command as ClapCommand, ArgAction};
use std::path::Path;
use std::process;
use log::{error, info};

use organize_media::api::MediaOrganizer;
use organize_media::commands::{CommandFactory, MediaCommandFactory};
use organize_media::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("organize-media")
        .version("0.1.0")
        .author("Maurice Schilpp")
        .about("Sort photos into YYYY/MM-DD folders by their Exif capture date")
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .help("Path to the source directory containing pictures")
                .value_name("DIR")
                .required_unless_present("inspect"),
        )
        .arg(
            Arg::new("dest")
                .short('d')
                .long("dest")
                .help("Path to the destination directory for organized pictures")
                .value_name("DIR")
                .required_unless_present("inspect"),
        )
        .arg(
            Arg::new("compression")
                .short('c')
                .long("compression")
                .help("Compression level for JPG files (0-100, optional)")
                .value_name("LEVEL")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("delete")
                .long("delete")
                .help("Delete source files after processing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("enable-log")
                .long("enable-log")
                .help("Also write the log to ./logs/")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Skip the confirmation prompt")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("formats")
                .long("formats")
                .help("Extra format table merged over the built-in one")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("inspect")
                .short('i')
                .long("inspect")
                .help("Print the capture date of the given files and exit")
                .value_name("FILE")
                .num_args(1..)
                .conflicts_with_all(["source", "dest", "delete", "compression"]),
        )
        .get_matches();

    match Logger::init_global_logger(matches.get_flag("enable-log"), matches.get_flag("verbose")) {
        Ok(Some(path)) => info!("Logging to {}", path.display()),
        Ok(None) => {},
        Err(e) => {
            eprintln!("Error setting up global logger: {}", e);
            process::exit(1);
        }
    }

    let organizer = match matches.get_one::<String>("formats") {
        Some(path) => match MediaOrganizer::with_formats_file(Path::new(path)) {
            Ok(organizer) => organizer,
            Err(e) => {
                error!("Failed to load format table: {}", e);
                process::exit(1);
            }
        },
        None => MediaOrganizer::new(),
    };

    let factory = MediaCommandFactory::new();

    let command_result = factory.create_command(&matches, &organizer);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            process::exit(1);
        }
    };
}
