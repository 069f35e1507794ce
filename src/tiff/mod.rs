//! TIFF structure parsing
//!
//! This module reads just enough of a TIFF header and its Image File
//! Directories to find an Exif capture date.

pub mod constants;
pub mod header;
pub mod ifd;
pub mod reader;
pub(crate) mod validation;
#[cfg(test)]
pub(crate) mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use header::TiffHeader;
pub use ifd::{IFD, IFDEntry};
pub use reader::{read_date_time, TiffDateReader};
