//! Per-file processing
//!
//! Reads a media file, asks the extractor for its capture date and writes it
//! to `<dest>/YYYY/MM-DD/<name>`, recompressing JPEGs when a quality is set.

use std::fs;
use std::path::{Path, PathBuf};
use chrono::{Datelike, NaiveDateTime};
use image::codecs::jpeg::JpegEncoder;
use log::{debug, info, warn};

use crate::errors::{MediaError, MediaResult};
use crate::extractor::{extension_of, find_exif_segment, DateExtractor};

use super::summary::ProcessingSummary;

/// Name of the probe file written by `check_destination_writable`
pub const WRITE_PROBE_NAME: &str = "test_write.tmp";

/// Where a file dated `date` lands below `dest_root`
pub fn destination_path(dest_root: &Path, date: &NaiveDateTime, file: &Path) -> PathBuf {
    let mut target = dest_root
        .join(format!("{:04}", date.year()))
        .join(format!("{:02}-{:02}", date.month(), date.day()));
    if let Some(name) = file.file_name() {
        target.push(name);
    }
    target
}

/// Writes and removes a probe file to make sure `dest` accepts writes
pub fn check_destination_writable(dest: &Path) -> MediaResult<()> {
    let probe = dest.join(WRITE_PROBE_NAME);
    fs::write(&probe, b"")
        .map_err(|e| MediaError::GenericError(format!("destination is not writable: {}", e)))?;
    fs::remove_file(&probe)?;
    Ok(())
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Written unchanged
    Copied(PathBuf),
    /// Re-encoded as JPEG
    Compressed(PathBuf),
    /// Destination already existed
    Skipped(PathBuf),
    /// No capture date, left where it was
    Undated,
}

/// Moves files into the dated tree and keeps the running totals
pub struct MediaProcessor<'a> {
    extractor: DateExtractor<'a>,
    destination: PathBuf,
    compression: Option<u8>,
    delete_source: bool,
    summary: ProcessingSummary,
}

impl<'a> MediaProcessor<'a> {
    pub fn new(extractor: DateExtractor<'a>, destination: impl Into<PathBuf>) -> Self {
        MediaProcessor {
            extractor,
            destination: destination.into(),
            compression: None,
            delete_source: false,
            summary: ProcessingSummary::default(),
        }
    }

    /// JPEG quality to re-encode with
    pub fn with_compression(mut self, quality: Option<u8>) -> Self {
        self.compression = quality;
        self
    }

    /// Remove source files once they have been written
    pub fn with_delete_source(mut self, delete_source: bool) -> Self {
        self.delete_source = delete_source;
        self
    }

    /// Totals so far
    pub fn summary(&self) -> &ProcessingSummary {
        &self.summary
    }

    pub fn into_summary(self) -> ProcessingSummary {
        self.summary
    }

    /// Processes one file
    ///
    /// A missing capture date is not an error: the file is counted as
    /// undated and left alone. I/O and encoding failures are returned.
    pub fn process_file(&mut self, path: &Path) -> MediaResult<FileOutcome> {
        let buffer = fs::read(path)?;
        let extension = extension_of(path);

        let date = match self.extractor.extract(&buffer, &extension) {
            Ok(date) => date,
            Err(e) => {
                warn!("Could not get EXIF date for file {}: {}", path.display(), e);
                self.summary.undated += 1;
                return Ok(FileOutcome::Undated);
            },
        };

        let target = destination_path(&self.destination, &date, path);
        if target.exists() {
            info!("File already exists: {}, skipping", target.display());
            self.summary.skipped += 1;
            return Ok(FileOutcome::Skipped(target));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let outcome = match self.compression {
            Some(quality) if self.extractor.registry().is_jpeg(&extension) => {
                let encoded = recompress_jpeg(&buffer, quality)?;
                fs::write(&target, encoded)?;
                self.summary.compressed += 1;
                FileOutcome::Compressed(target)
            },
            _ => {
                fs::write(&target, &buffer)?;
                self.summary.copied += 1;
                FileOutcome::Copied(target)
            },
        };
        self.summary.processed += 1;

        if self.delete_source {
            fs::remove_file(path)?;
            self.summary.deleted += 1;
            debug!("Deleted source file {}", path.display());
        }

        match &outcome {
            FileOutcome::Compressed(target) => info!("Compressed {} -> {}", path.display(), target.display()),
            FileOutcome::Copied(target) => info!("Copied {} -> {}", path.display(), target.display()),
            _ => {},
        }

        Ok(outcome)
    }
}

/// Re-encodes a JPEG at `quality`, carrying over its Exif segment
///
/// The encoder writes no Exif of its own, so the original APP1 segment is
/// inserted right after the new SOI marker.
pub fn recompress_jpeg(buffer: &[u8], quality: u8) -> MediaResult<Vec<u8>> {
    let image = image::load_from_memory(buffer)?;
    let rgb = image.to_rgb8();

    let mut encoded = Vec::with_capacity(buffer.len());
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut encoded, quality.clamp(1, 100));
        encoder.encode_image(&rgb)?;
    }

    let Some(range) = find_exif_segment(buffer) else {
        return Ok(encoded);
    };
    if encoded.len() < 2 {
        return Ok(encoded);
    }

    let mut output = Vec::with_capacity(encoded.len() + range.len());
    output.extend_from_slice(&encoded[..2]);
    output.extend_from_slice(&buffer[range]);
    output.extend_from_slice(&encoded[2..]);
    Ok(output)
}
