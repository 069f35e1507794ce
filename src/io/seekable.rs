//! Seekable reader trait
//!
//! TIFF values are addressed by offsets relative to the TIFF header, so every
//! parser in this crate works on a reader that can both read and seek.

use std::io::{Read, Seek, SeekFrom};

/// Trait for readers that can both read and seek
///
/// An in-memory `Cursor<&[u8]>` is the usual implementor.
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}

/// Returns the total length of the stream, leaving the position unchanged
pub fn stream_len(reader: &mut dyn SeekableReader) -> std::io::Result<u64> {
    let current = reader.stream_position()?;
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(current))?;
    Ok(len)
}
