//! Offset-scanning locator
//!
//! Some vendor RAW files put their TIFF header a few bytes into the file.
//! This locator probes a short list of candidate offsets taken from the
//! format table.

use chrono::NaiveDateTime;
use log::debug;
use std::io::SeekFrom;

use crate::errors::{MediaError, MediaResult};
use crate::io::seekable::SeekableReader;
use crate::tiff;

use super::locator_strategy::LocatorStrategy;

/// Locator that tries a TIFF header at each candidate offset in turn
pub struct OffsetScanLocator {
    offsets: Vec<u64>,
}

impl OffsetScanLocator {
    pub fn new(offsets: Vec<u64>) -> Self {
        OffsetScanLocator { offsets }
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }
}

impl LocatorStrategy for OffsetScanLocator {
    fn name(&self) -> &'static str {
        "offsets"
    }

    /// Returns the date from the first offset that yields one
    ///
    /// An offset only wins when a full date with a plausible year was read
    /// from it; a header that merely parses is not enough.
    fn locate(&self, reader: &mut dyn SeekableReader) -> MediaResult<NaiveDateTime> {
        for &offset in &self.offsets {
            if let Err(e) = reader.seek(SeekFrom::Start(offset)) {
                debug!("Cannot seek to offset {}: {}", offset, e);
                continue;
            }

            match tiff::read_date_time(reader) {
                Ok(date) => {
                    debug!("TIFF date found at offset {}", offset);
                    return Ok(date);
                },
                Err(e) => debug!("No TIFF date at offset {}: {}", offset, e),
            }
        }

        Err(MediaError::NoTiffAtKnownOffsets)
    }
}
