//! Locator strategy definitions
//!
//! A locator knows where inside one kind of container the TIFF structure
//! (or a bare date string) lives. The orchestrator tries locators in order
//! until one produces a date.

use chrono::NaiveDateTime;

use crate::errors::MediaResult;
use crate::io::seekable::SeekableReader;

use super::formats::LocatorKind;
use super::jpeg_strategy::JpegLocator;
use super::offset_strategy::OffsetScanLocator;
use super::scan_strategy::FallbackScanner;
use super::tiff_strategy::PlainTiffLocator;

/// Strategy for finding a capture date inside one container layout
///
/// Implementations may leave the reader anywhere, on success or failure;
/// callers rewind before handing the reader to the next strategy.
pub trait LocatorStrategy {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Find a capture date, starting from the beginning of the reader
    ///
    /// # Returns
    /// The date, or the error describing why this layout did not match
    fn locate(&self, reader: &mut dyn SeekableReader) -> MediaResult<NaiveDateTime>;
}

/// Factory turning planned locator kinds into strategies
pub struct LocatorStrategyFactory;

impl LocatorStrategyFactory {
    /// Create the strategy for a planned locator
    pub fn create_strategy(kind: &LocatorKind) -> Box<dyn LocatorStrategy> {
        match kind {
            LocatorKind::Jpeg => Box::new(JpegLocator),
            LocatorKind::PlainTiff => Box::new(PlainTiffLocator),
            LocatorKind::OffsetScan(offsets) => Box::new(OffsetScanLocator::new(offsets.clone())),
            LocatorKind::Scan => Box::new(FallbackScanner::new()),
        }
    }
}
