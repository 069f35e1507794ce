//! Plain TIFF locator
//!
//! For containers that are themselves TIFF files (NEF, DNG, most RAW), the
//! header sits at byte 0.

use chrono::NaiveDateTime;

use crate::errors::MediaResult;
use crate::io::seekable::SeekableReader;
use crate::tiff;

use super::locator_strategy::LocatorStrategy;

/// Locator that reads a TIFF header at the current (start) position
pub struct PlainTiffLocator;

impl LocatorStrategy for PlainTiffLocator {
    fn name(&self) -> &'static str {
        "tiff"
    }

    fn locate(&self, reader: &mut dyn SeekableReader) -> MediaResult<NaiveDateTime> {
        tiff::read_date_time(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::errors::MediaError;
    use crate::tiff::tests::test_utils::{date, TiffFixture};

    #[test]
    fn test_reads_tiff_at_start() {
        let data = TiffFixture::little_endian().date_tag(0x9003, "2017:04:05 06:07:08").build();

        let result = PlainTiffLocator.locate(&mut Cursor::new(&data[..])).unwrap();
        assert_eq!(result, date(2017, 4, 5, 6, 7, 8));
    }

    #[test]
    fn test_jpeg_is_not_tiff() {
        let data = [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10];

        let result = PlainTiffLocator.locate(&mut Cursor::new(&data[..]));
        assert!(matches!(result, Err(MediaError::InvalidByteOrder(0xD8FF))));
    }
}
