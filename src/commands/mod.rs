//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod organize_command;
pub mod inspect_command;

pub use command_traits::{Command, CommandFactory};
pub use organize_command::OrganizeCommand;
pub use inspect_command::InspectCommand;

use clap::ArgMatches;
use crate::api::MediaOrganizer;
use crate::errors::MediaResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct MediaCommandFactory;

impl MediaCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        MediaCommandFactory
    }
}

impl Default for MediaCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for MediaCommandFactory {
    fn create_command(&self, args: &ArgMatches, organizer: &'a MediaOrganizer) -> MediaResult<Box<dyn Command + 'a>> {
        if args.contains_id("inspect") {
            Ok(Box::new(InspectCommand::new(args, organizer)?))
        } else {
            // Default to organizing
            Ok(Box::new(OrganizeCommand::new(args, organizer)?))
        }
    }
}
