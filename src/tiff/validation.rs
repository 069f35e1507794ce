//! TIFF validation utilities
//!
//! Checks applied to offsets read from untrusted files before seeking.

use log::warn;

use crate::errors::{MediaError, MediaResult};
use crate::tiff::constants::header;
use crate::tiff::header::TiffHeader;

/// Validates an IFD offset against the header it belongs to
///
/// # Arguments
/// * `offset` - The IFD offset, relative to the TIFF header
/// * `tiff_header` - The header the offset was read from
/// * `stream_len` - Total length of the underlying data
///
/// # Returns
/// Ok if the offset lands after the header and inside the data
pub fn validate_ifd_offset(offset: u32, tiff_header: &TiffHeader, stream_len: u64) -> MediaResult<()> {
    if offset < header::HEADER_SIZE || tiff_header.resolve(offset) >= stream_len {
        warn!("Invalid IFD offset: {} (header at {}, data length {})",
              offset, tiff_header.start, stream_len);
        return Err(MediaError::InvalidIfdOffset(offset));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::byte_order::ByteOrder;

    fn header_at(start: u64) -> TiffHeader {
        TiffHeader { start, byte_order: ByteOrder::LittleEndian, first_ifd_offset: 8 }
    }

    #[test]
    fn test_offset_inside_header_is_rejected() {
        let result = validate_ifd_offset(4, &header_at(0), 100);
        assert!(matches!(result, Err(MediaError::InvalidIfdOffset(4))));
    }

    #[test]
    fn test_offset_past_end_is_rejected() {
        assert!(validate_ifd_offset(90, &header_at(10), 100).is_err());
        assert!(validate_ifd_offset(89, &header_at(10), 100).is_ok());
    }
}
