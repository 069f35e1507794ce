//! Capture date extraction from image containers
//!
//! This module finds the embedded Exif date using a strategy pattern: one
//! locator per container layout, tried in an order planned from the format
//! table.

mod locator_strategy;
mod jpeg_strategy;
mod tiff_strategy;
mod offset_strategy;
mod scan_strategy;
mod date_extractor;
pub mod formats;

// Public exports
pub use locator_strategy::{LocatorStrategy, LocatorStrategyFactory};
pub use jpeg_strategy::{find_exif_segment, JpegLocator, EXIF_IDENTIFIER};
pub use tiff_strategy::PlainTiffLocator;
pub use offset_strategy::OffsetScanLocator;
pub use scan_strategy::{FallbackScanner, SCAN_CHUNK_SIZE, SCAN_LIMIT};
pub use formats::{extension_of, normalize_extension, FormatRegistry, LocatorKind};

// Simple facade that delegates to the appropriate strategies
pub use date_extractor::DateExtractor;

use chrono::NaiveDateTime;
use crate::errors::MediaResult;

/// Extracts the capture date from a file buffer using the built-in format table
///
/// `extension` includes the leading dot and is matched case-insensitively.
pub fn extract_date_time(buffer: &[u8], extension: &str) -> MediaResult<NaiveDateTime> {
    DateExtractor::builtin().extract(buffer, extension)
}
