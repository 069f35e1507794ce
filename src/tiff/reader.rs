//! TIFF date reader
//!
//! Walks IFD0 (and the Exif sub-IFD it points to) looking for the
//! DateTimeOriginal, DateTimeDigitized and DateTime tags. Every offset is
//! resolved against the position of the TIFF header, so the reader works
//! wherever the header sits inside a container.

use chrono::NaiveDateTime;
use log::{debug, warn};
use std::io::SeekFrom;

use crate::errors::{MediaError, MediaResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::{self, SeekableReader};
use crate::tiff::constants::{field_types, tags};
use crate::tiff::header::TiffHeader;
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::validation;
use crate::utils::date_utils::{self, EXIF_DATE_TIME_LEN};

/// Reads a capture date from the TIFF header at the reader's current position
///
/// This is the entry point the container locators delegate to.
pub fn read_date_time(reader: &mut dyn SeekableReader) -> MediaResult<NaiveDateTime> {
    TiffDateReader::open(reader)?.read_date_time(reader)
}

/// Reader bound to a single TIFF header
///
/// Holds no state beyond the header itself, so one instance per call is
/// cheap and calls never influence each other.
pub struct TiffDateReader {
    /// The header all offsets are relative to
    header: TiffHeader,
    /// Current byte order handler
    byte_order_handler: Box<dyn ByteOrderHandler>,
}

impl TiffDateReader {
    /// Parses the TIFF header at the current position
    pub fn open(reader: &mut dyn SeekableReader) -> MediaResult<Self> {
        let (header, byte_order_handler) = TiffHeader::read(reader)?;
        Ok(TiffDateReader { header, byte_order_handler })
    }

    /// The parsed header
    pub fn header(&self) -> &TiffHeader {
        &self.header
    }

    /// Finds and parses the best date/time value
    ///
    /// Candidates from IFD0 and the Exif sub-IFD are tried in tag priority
    /// order; a value that does not parse falls through to the next one.
    pub fn read_date_time(&self, reader: &mut dyn SeekableReader) -> MediaResult<NaiveDateTime> {
        let stream_len = seekable::stream_len(reader)?;
        validation::validate_ifd_offset(self.header.first_ifd_offset, &self.header, stream_len)?;

        let ifd0 = self.read_ifd(reader, self.header.first_ifd_offset, 0)?;
        let mut candidates: Vec<IFDEntry> = ifd0.date_candidates().cloned().collect();

        if let Some(pointer) = ifd0.get_entry(tags::EXIF_IFD_POINTER) {
            match self.read_exif_ifd(reader, pointer, stream_len) {
                Ok(exif_ifd) => candidates.extend(exif_ifd.date_candidates().cloned()),
                Err(e) => warn!("Ignoring unreadable Exif sub-IFD: {}", e),
            }
        }

        if candidates.is_empty() {
            return Err(if ifd0.truncated {
                MediaError::TruncatedData
            } else {
                MediaError::NoDateTimeFound
            });
        }

        // Stable: equal tags keep directory order
        candidates.sort_by_key(IFDEntry::date_priority);

        for entry in &candidates {
            match self.read_date_value(reader, entry) {
                Ok(date) => {
                    debug!("Found {} = {}", tags::name(entry.tag), date);
                    return Ok(date);
                },
                Err(e) => debug!("Could not use {}: {}", tags::name(entry.tag), e),
            }
        }

        Err(MediaError::NoDateTimeFound)
    }

    /// Reads an IFD from the reader
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `offset` - Offset of the IFD relative to the TIFF header
    /// * `number` - The index of this IFD, used for logging
    ///
    /// # Returns
    /// The parsed IFD. If the data ends inside the entry table the entries
    /// read so far are kept and the IFD is flagged as truncated.
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u32, number: usize) -> MediaResult<IFD> {
        reader.seek(SeekFrom::Start(self.header.resolve(offset)))?;

        let handler = self.byte_order_handler.as_ref();
        let entry_count = handler.read_u16(reader)?;
        debug!("IFD #{} entry count: {}", number, entry_count);

        let mut ifd = IFD::new(number, offset);
        for index in 0..entry_count {
            match self.read_ifd_entry(reader) {
                Ok(entry) => ifd.add_entry(entry),
                Err(MediaError::TruncatedData) if index > 0 => {
                    warn!("IFD #{} ends after {} of {} entries", number, index, entry_count);
                    ifd.truncated = true;
                    break;
                },
                Err(e) => return Err(e),
            }
        }

        Ok(ifd)
    }

    /// Reads a single 12-byte IFD entry
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> MediaResult<IFDEntry> {
        let handler = self.byte_order_handler.as_ref();

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = handler.read_u32(reader)?;
        let value_offset = handler.read_u32(reader)?;

        Ok(IFDEntry::new(tag, field_type, count, value_offset))
    }

    /// Follows the ExifIFD pointer found in IFD0
    fn read_exif_ifd(&self, reader: &mut dyn SeekableReader, pointer: &IFDEntry, stream_len: u64) -> MediaResult<IFD> {
        if !matches!(pointer.field_type, field_types::LONG | field_types::IFD) {
            return Err(MediaError::GenericError(format!(
                "Exif IFD pointer has field type {}", pointer.field_type)));
        }

        validation::validate_ifd_offset(pointer.value_offset, &self.header, stream_len)?;
        self.read_ifd(reader, pointer.value_offset, 1)
    }

    /// Reads and parses the date string an entry points at
    fn read_date_value(&self, reader: &mut dyn SeekableReader, entry: &IFDEntry) -> MediaResult<NaiveDateTime> {
        reader.seek(SeekFrom::Start(self.header.resolve(entry.value_offset)))?;

        let mut value = [0u8; EXIF_DATE_TIME_LEN];
        reader.read_exact(&mut value)?;

        date_utils::parse_exif_date_time(&value).ok_or_else(|| {
            MediaError::GenericError(format!(
                "Unparseable date value {:?}", String::from_utf8_lossy(&value)))
        })
    }
}
