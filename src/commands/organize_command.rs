//! Photo organizing command
//!
//! This module implements the default command: confirm with the user, then
//! sort the source tree into the dated destination tree.

use clap::ArgMatches;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::api::MediaOrganizer;
use crate::commands::command_traits::Command;
use crate::errors::{MediaError, MediaResult};
use crate::organizer::params::{parse_compression, OrganizeParams};

/// Command for organizing a source directory
pub struct OrganizeCommand<'a> {
    /// Validated run configuration
    params: OrganizeParams,
    organizer: &'a MediaOrganizer,
}

impl<'a> OrganizeCommand<'a> {
    /// Create a new organize command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `organizer` - Organizer to run
    ///
    /// # Returns
    /// A new OrganizeCommand instance or an error
    pub fn new(args: &ArgMatches, organizer: &'a MediaOrganizer) -> MediaResult<Self> {
        let source = args.get_one::<String>("source")
            .ok_or_else(|| MediaError::ConfigError("Missing --source directory".to_string()))?;
        let destination = args.get_one::<String>("dest")
            .ok_or_else(|| MediaError::ConfigError("Missing --dest directory".to_string()))?;

        let compression = match args.get_one::<String>("compression") {
            Some(value) => parse_compression(value)?,
            None => None,
        };

        let params = OrganizeParams {
            source: PathBuf::from(source),
            destination: PathBuf::from(destination),
            compression,
            delete_source: args.get_flag("delete"),
            skip_confirmation: args.get_flag("yes"),
            enable_log: args.get_flag("enable-log"),
            show_progress: true,
        };

        Ok(OrganizeCommand { params, organizer })
    }

    /// Create the command from already-built params
    pub fn from_params(params: OrganizeParams, organizer: &'a MediaOrganizer) -> Self {
        OrganizeCommand { params, organizer }
    }

    pub fn params(&self) -> &OrganizeParams {
        &self.params
    }

    /// Logs the run configuration
    fn log_configuration(&self) {
        info!("Application started.");
        info!("Source directory: {}", self.params.source.display());
        info!("Destination directory: {}", self.params.destination.display());

        match self.params.compression {
            Some(quality) => info!("Compression level: {}", quality),
            None => info!("Compression: not applied"),
        }

        info!("Delete source files: {}", self.params.delete_source);
    }

    /// Runs the organizer, asking for confirmation on `input` first
    ///
    /// # Arguments
    /// * `input` - Where the answer to the confirmation prompt is read from
    ///
    /// # Returns
    /// `Cancelled` unless the answer is `y`, otherwise the organizer's result
    pub fn run_with_input<R: BufRead>(&self, input: &mut R) -> MediaResult<()> {
        self.params.validate()?;
        self.log_configuration();

        let (total, size) = self.organizer.count_files(&self.params.source)?;
        if total == 0 {
            return Err(MediaError::GenericError("no files to process in source directory".to_string()));
        }
        info!("Number of files to process: {} [{} bytes]", total, size);

        if self.params.skip_confirmation {
            info!("Skipping user input confirmation.");
        } else if !confirm(input, total)? {
            info!("Operation cancelled.");
            return Err(MediaError::Cancelled);
        }

        let summary = self.organizer.organize(&self.params)?;
        summary.log();
        info!("Process completed.");
        Ok(())
    }
}

/// Asks whether to go ahead with `total` files; only `y` counts as yes
fn confirm<R: BufRead>(input: &mut R, total: usize) -> MediaResult<bool> {
    print!("Do you want to proceed with processing {} files? (y/n): ", total);
    io::stdout().flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}

impl<'a> Command for OrganizeCommand<'a> {
    fn execute(&self) -> MediaResult<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        self.run_with_input(&mut input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn test_confirm_answers() {
        assert!(confirm(&mut Cursor::new("y\n"), 3).unwrap());
        assert!(confirm(&mut Cursor::new("Y\n"), 3).unwrap());
        assert!(!confirm(&mut Cursor::new("n\n"), 3).unwrap());
        assert!(!confirm(&mut Cursor::new("yes\n"), 3).unwrap());
        assert!(!confirm(&mut Cursor::new(""), 3).unwrap());
    }

    #[test]
    fn test_declined_prompt_cancels() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.jpg"), b"not really a jpeg").unwrap();

        let organizer = MediaOrganizer::new();
        let command = OrganizeCommand::from_params(OrganizeParams::new(src.path(), dest.path()), &organizer);

        let result = command.run_with_input(&mut Cursor::new("n\n"));
        assert!(matches!(result, Err(MediaError::Cancelled)));
        assert!(src.path().join("a.jpg").exists());
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();

        let organizer = MediaOrganizer::new();
        let command = OrganizeCommand::from_params(OrganizeParams::new(src.path(), dest.path()), &organizer);

        let result = command.run_with_input(&mut Cursor::new("y\n"));
        assert!(matches!(result, Err(MediaError::GenericError(_))));
    }
}
