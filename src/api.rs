use std::fs;
use std::path::Path;
use chrono::NaiveDateTime;
use log::{debug, info};

use crate::errors::{MediaError, MediaResult};
use crate::extractor::{extension_of, DateExtractor, FormatRegistry};
use crate::organizer::{self, MediaProcessor, OrganizeParams, ProcessingSummary};
use crate::utils::progress::ProgressTracker;

/// Main interface to the organize-media library
#[derive(Debug, Clone)]
pub struct MediaOrganizer {
    registry: FormatRegistry,
}

impl MediaOrganizer {
    /// Create an organizer using the built-in format table
    pub fn new() -> Self {
        MediaOrganizer {
            registry: FormatRegistry::builtin().clone(),
        }
    }

    /// Create an organizer over a custom format table
    pub fn with_registry(registry: FormatRegistry) -> Self {
        MediaOrganizer { registry }
    }

    /// Create an organizer with a user format file merged over the built-in table
    ///
    /// # Arguments
    /// * `path` - TOML file in the same shape as the built-in `formats.toml`
    pub fn with_formats_file(path: &Path) -> MediaResult<Self> {
        Ok(MediaOrganizer {
            registry: FormatRegistry::load(path)?,
        })
    }

    /// The format table in use
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Extractor borrowing this organizer's format table
    pub fn extractor(&self) -> DateExtractor<'_> {
        DateExtractor::new(&self.registry)
    }

    /// Read a file and extract its capture date
    ///
    /// # Arguments
    /// * `path` - The media file; its extension selects the strategies
    ///
    /// # Returns
    /// The capture date or the reason none was found
    pub fn extract_date(&self, path: &Path) -> MediaResult<NaiveDateTime> {
        let buffer = fs::read(path)?;
        self.extractor().extract(&buffer, &extension_of(path))
    }

    /// Number and total size of the media files below `dir`
    pub fn count_files(&self, dir: &Path) -> MediaResult<(usize, u64)> {
        organizer::count_media_files(dir, &self.registry)
    }

    /// Sort every media file below `params.source` into `params.destination`
    ///
    /// # Arguments
    /// * `params` - Validated here: both directories must exist and the
    ///   quality must be at most 100
    ///
    /// # Returns
    /// Totals for the run, or the first I/O or encoding error
    pub fn organize(&self, params: &OrganizeParams) -> MediaResult<ProcessingSummary> {
        params.validate()?;

        let (total, _) = self.count_files(&params.source)?;
        if total == 0 {
            return Err(MediaError::GenericError("no files to process in source directory".to_string()));
        }

        organizer::check_destination_writable(&params.destination)?;

        let files = organizer::collect_media_files(&params.source, &self.registry)?;
        let progress = if params.show_progress {
            ProgressTracker::new(files.len() as u64, "Processing files")
        } else {
            ProgressTracker::hidden(files.len() as u64)
        };

        let mut processor = MediaProcessor::new(self.extractor(), &params.destination)
            .with_compression(params.compression)
            .with_delete_source(params.delete_source);

        for file in &files {
            debug!("Processing file: {}", file.display());
            processor.process_file(file)?;
            progress.increment(1);
        }
        progress.finish();

        let summary = processor.into_summary();
        info!("Finished organizing {} files: {}", files.len(), summary);
        Ok(summary)
    }
}

impl Default for MediaOrganizer {
    fn default() -> Self {
        Self::new()
    }
}
