//! TIFF header parsing

use log::debug;

use crate::errors::{MediaError, MediaResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;

/// The 8-byte prologue that marks a region of bytes as TIFF structured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Absolute stream position of the byte order marker
    pub start: u64,
    /// Byte order of every multi-byte field that follows
    pub byte_order: ByteOrder,
    /// Offset of IFD0, relative to `start`
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Reads a TIFF header at the reader's current position
    ///
    /// The header does not have to sit at the start of the stream; all
    /// offsets found inside it are later resolved against `start`.
    pub fn read(reader: &mut dyn SeekableReader) -> MediaResult<(Self, Box<dyn ByteOrderHandler>)> {
        let start = reader.stream_position()?;

        let byte_order = ByteOrder::detect(reader)?;
        debug!("Detected byte order: {} at {}", byte_order.name(), start);
        let handler = byte_order.create_handler();

        let marker = handler.read_u16(reader)?;
        if marker != header::TIFF_VERSION {
            return Err(MediaError::InvalidTiffMarker(marker));
        }

        let first_ifd_offset = handler.read_u32(reader)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        Ok((TiffHeader { start, byte_order, first_ifd_offset }, handler))
    }

    /// Converts an offset stored in the TIFF structure to a stream position
    pub fn resolve(&self, offset: u32) -> u64 {
        self.start + u64::from(offset)
    }
}
