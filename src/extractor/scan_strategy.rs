//! Fallback date scanner
//!
//! Last resort for containers none of the structured locators understand:
//! look for a `YYYY:MM:DD HH:MM:SS` string anywhere in the first MiB. The
//! plausible-year check in the date parser rejects binary noise that happens
//! to have the right punctuation.

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use log::debug;
use regex::bytes::Regex;
use std::io::{ErrorKind, SeekFrom};

use crate::errors::{MediaError, MediaResult};
use crate::io::seekable::SeekableReader;
use crate::utils::date_utils::{self, EXIF_DATE_TIME_LEN};

use super::locator_strategy::LocatorStrategy;

/// Bytes read per chunk
pub const SCAN_CHUNK_SIZE: usize = 4096;

/// Bytes examined before giving up
pub const SCAN_LIMIT: usize = 1024 * 1024;

lazy_static! {
    static ref DATE_TIME_PATTERN: Regex =
        Regex::new(r"[0-9]{4}:[0-9]{2}:[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}")
            .expect("date pattern is valid");
}

/// Locator that scans raw bytes for a textual date
pub struct FallbackScanner {
    chunk_size: usize,
    limit: usize,
}

impl FallbackScanner {
    pub fn new() -> Self {
        FallbackScanner {
            chunk_size: SCAN_CHUNK_SIZE,
            limit: SCAN_LIMIT,
        }
    }

    /// Scanner with a different chunk size and byte budget
    pub fn with_limits(chunk_size: usize, limit: usize) -> Self {
        FallbackScanner {
            chunk_size: chunk_size.max(1),
            limit,
        }
    }

    /// First plausible date in `window`
    fn find_in(window: &[u8]) -> Option<NaiveDateTime> {
        DATE_TIME_PATTERN
            .find_iter(window)
            .find_map(|candidate| date_utils::parse_exif_date_time(candidate.as_bytes()))
    }
}

impl Default for FallbackScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorStrategy for FallbackScanner {
    fn name(&self) -> &'static str {
        "scan"
    }

    /// Scans chunk by chunk from the start of the reader
    ///
    /// The last `EXIF_DATE_TIME_LEN - 1` bytes of each chunk are carried into
    /// the next window so a date split across a chunk boundary is still seen.
    fn locate(&self, reader: &mut dyn SeekableReader) -> MediaResult<NaiveDateTime> {
        reader.seek(SeekFrom::Start(0))?;

        let carry = EXIF_DATE_TIME_LEN - 1;
        let mut chunk = vec![0u8; self.chunk_size];
        let mut window: Vec<u8> = Vec::with_capacity(self.chunk_size + carry);
        let mut examined = 0usize;

        while examined < self.limit {
            let wanted = self.chunk_size.min(self.limit - examined);
            let read = match reader.read(&mut chunk[..wanted]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            examined += read;

            window.extend_from_slice(&chunk[..read]);
            if let Some(date) = Self::find_in(&window) {
                debug!("Found date string within the first {} bytes", examined);
                return Ok(date);
            }

            let keep = window.len().min(carry);
            window.drain(..window.len() - keep);
        }

        debug!("No date string in the first {} bytes", examined);
        Err(MediaError::NoDateTimeFound)
    }
}
