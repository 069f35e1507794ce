//! Date inspection command
//!
//! Prints the capture date the extractor finds for each given file without
//! touching anything on disk.

use clap::ArgMatches;
use log::debug;
use std::path::PathBuf;

use crate::api::MediaOrganizer;
use crate::commands::command_traits::Command;
use crate::errors::{MediaError, MediaResult};

/// Output format of inspected dates
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Command for printing extracted dates
pub struct InspectCommand<'a> {
    /// Files to inspect
    files: Vec<PathBuf>,
    organizer: &'a MediaOrganizer,
}

impl<'a> InspectCommand<'a> {
    /// Create a new inspect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `organizer` - Organizer whose format table drives extraction
    ///
    /// # Returns
    /// A new InspectCommand instance or an error
    pub fn new(args: &ArgMatches, organizer: &'a MediaOrganizer) -> MediaResult<Self> {
        let files: Vec<PathBuf> = args
            .get_many::<String>("inspect")
            .ok_or_else(|| MediaError::GenericError("Missing files to inspect".to_string()))?
            .map(PathBuf::from)
            .collect();

        Ok(InspectCommand { files, organizer })
    }

    /// One output line for a file
    pub fn describe(&self, file: &std::path::Path) -> String {
        match self.organizer.extract_date(file) {
            Ok(date) => format!("{}: {}", file.display(), date.format(DISPLAY_FORMAT)),
            Err(e) => format!("{}: {}", file.display(), e),
        }
    }
}

impl<'a> Command for InspectCommand<'a> {
    fn execute(&self) -> MediaResult<()> {
        debug!("Inspecting {} files", self.files.len());

        for file in &self.files {
            println!("{}", self.describe(file));
        }

        Ok(())
    }
}
