//! JPEG locator
//!
//! Walks the JPEG marker segments up to the start of scan, looking for an
//! APP1 segment that carries the `Exif\0\0` identifier, and hands the TIFF
//! structure inside it to the TIFF date reader.

use byteorder::{BigEndian, ReadBytesExt};
use chrono::NaiveDateTime;
use log::debug;
use std::io::SeekFrom;
use std::ops::Range;

use crate::errors::{MediaError, MediaResult};
use crate::io::seekable::SeekableReader;
use crate::tiff;

use super::locator_strategy::LocatorStrategy;

/// JPEG marker codes
pub mod markers {
    /// Start of image
    pub const SOI: u16 = 0xFFD8;
    /// End of image
    pub const EOI: u16 = 0xFFD9;
    /// Start of scan, compressed data follows
    pub const SOS: u16 = 0xFFDA;
    /// Application segment 1 (Exif, XMP)
    pub const APP1: u16 = 0xFFE1;
    /// Temporary private use, no length field
    pub const TEM: u16 = 0xFF01;
    /// Fill byte pair
    pub const FILL: u16 = 0xFFFF;
}

/// Identifier opening the payload of an Exif APP1 segment
pub const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";

/// Locator for Exif data in JPEG files
pub struct JpegLocator;

impl JpegLocator {
    /// Markers that stand alone without a length field
    fn is_standalone(marker: u16) -> bool {
        marker == markers::TEM || (0xFFD0..=0xFFD7).contains(&marker)
    }

    /// Handles an APP1 segment, the marker has already been consumed
    ///
    /// Returns `Ok(None)` when the segment held no usable Exif date and the
    /// reader has been moved to the end of the segment.
    fn read_app1(&self, reader: &mut dyn SeekableReader, length: u16) -> MediaResult<Option<NaiveDateTime>> {
        let payload_start = reader.stream_position()?;
        let segment_end = payload_start + u64::from(length - 2);

        if usize::from(length - 2) >= EXIF_IDENTIFIER.len() {
            let mut identifier = [0u8; 6];
            reader.read_exact(&mut identifier)?;

            if &identifier == EXIF_IDENTIFIER {
                match tiff::read_date_time(reader) {
                    Ok(date) => return Ok(Some(date)),
                    Err(e) => debug!("Exif APP1 at {} did not yield a date: {}", payload_start, e),
                }
            } else {
                debug!("APP1 at {} is not Exif", payload_start);
            }
        }

        reader.seek(SeekFrom::Start(segment_end))?;
        Ok(None)
    }
}

/// Byte range of the first Exif APP1 segment (marker included) in a JPEG
///
/// Used to carry Exif over when a JPEG is re-encoded. Returns `None` for
/// anything that is not a JPEG or has no Exif segment before the scan data.
pub fn find_exif_segment(buffer: &[u8]) -> Option<Range<usize>> {
    if !buffer.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut pos = 2;
    loop {
        let marker = u16::from_be_bytes([*buffer.get(pos)?, *buffer.get(pos + 1)?]);
        if marker >> 8 != 0xFF || marker == markers::SOS || marker == markers::EOI {
            return None;
        }
        if marker == markers::FILL {
            pos += 1;
            continue;
        }
        if JpegLocator::is_standalone(marker) {
            pos += 2;
            continue;
        }

        let length = usize::from(u16::from_be_bytes([*buffer.get(pos + 2)?, *buffer.get(pos + 3)?]));
        if length < 2 {
            return None;
        }

        let end = pos + 2 + length;
        if marker == markers::APP1 && buffer.get(pos + 4..pos + 10)? == &EXIF_IDENTIFIER[..] {
            return (end <= buffer.len()).then_some(pos..end);
        }
        pos = end;
    }
}

impl LocatorStrategy for JpegLocator {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn locate(&self, reader: &mut dyn SeekableReader) -> MediaResult<NaiveDateTime> {
        let soi = reader.read_u16::<BigEndian>()?;
        if soi != markers::SOI {
            return Err(MediaError::NotJpeg(soi));
        }

        // Running out of data anywhere below just means no Exif was found
        loop {
            let Ok(marker) = reader.read_u16::<BigEndian>() else { break };

            if marker >> 8 != 0xFF {
                continue;
            }

            match marker {
                markers::SOS | markers::EOI => {
                    debug!("Reached {:#06x} without finding Exif", marker);
                    break;
                },
                markers::FILL => {
                    // The second 0xFF may start the real marker
                    reader.seek(SeekFrom::Current(-1))?;
                },
                m if Self::is_standalone(m) => {},
                _ => {
                    let Ok(length) = reader.read_u16::<BigEndian>() else { break };
                    if length < 2 {
                        return Err(MediaError::CorruptJpegSegment { marker, length });
                    }

                    if marker == markers::APP1 {
                        match self.read_app1(reader, length) {
                            Ok(Some(date)) => return Ok(date),
                            Ok(None) => {},
                            Err(MediaError::TruncatedData) => break,
                            Err(e) => return Err(e),
                        }
                    } else {
                        reader.seek(SeekFrom::Current(i64::from(length - 2)))?;
                    }
                },
            }
        }

        Err(MediaError::NoExifInJpeg)
    }
}
