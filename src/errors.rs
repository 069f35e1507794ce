//! Error types shared by the extractor and the organizer pipeline

use std::fmt;
use std::io;

/// Errors produced while reading capture dates or organizing files
#[derive(Debug)]
pub enum MediaError {
    /// I/O error
    IoError(io::Error),
    /// A read needed more bytes than the stream had left
    TruncatedData,
    /// TIFF byte order marker is neither "II" nor "MM"
    InvalidByteOrder(u16),
    /// TIFF magic number is not 42
    InvalidTiffMarker(u16),
    /// IFD offset points into the header or past the end of the data
    InvalidIfdOffset(u32),
    /// The buffer does not start with the JPEG SOI marker
    NotJpeg(u16),
    /// A JPEG segment declared an impossible length
    CorruptJpegSegment { marker: u16, length: u16 },
    /// JPEG parsed but carried no usable Exif APP1 segment
    NoExifInJpeg,
    /// None of the candidate offsets held a TIFF header with a date
    NoTiffAtKnownOffsets,
    /// The structure parsed but no recognized date/time was present
    NoDateTimeFound,
    /// Every extraction strategy failed
    NoDateTimeInformation,
    /// File extension is not something we read dates from
    UnsupportedFormat(String),
    /// Bad run configuration or format table
    ConfigError(String),
    /// JPEG decode/encode failure while recompressing
    ImageError(String),
    /// The user declined the confirmation prompt
    Cancelled,
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::IoError(e) => write!(f, "I/O error: {}", e),
            MediaError::TruncatedData => write!(f, "Unexpected end of data"),
            MediaError::InvalidByteOrder(v) => write!(f, "Invalid TIFF byte order marker: {:#06x}", v),
            MediaError::InvalidTiffMarker(v) => write!(f, "Invalid TIFF marker: {} (expected 42)", v),
            MediaError::InvalidIfdOffset(o) => write!(f, "Invalid IFD offset: {}", o),
            MediaError::NotJpeg(m) => write!(f, "Not a JPEG file (starts with {:#06x})", m),
            MediaError::CorruptJpegSegment { marker, length } => {
                write!(f, "Corrupt JPEG segment {:#06x} with length {}", marker, length)
            },
            MediaError::NoExifInJpeg => write!(f, "No EXIF data found in JPEG structure"),
            MediaError::NoTiffAtKnownOffsets => write!(f, "Couldn't find EXIF data at known offsets"),
            MediaError::NoDateTimeFound => write!(f, "No date/time tag found"),
            MediaError::NoDateTimeInformation => write!(f, "No date/time information found"),
            MediaError::UnsupportedFormat(ext) => write!(f, "Unsupported file format: {}", ext),
            MediaError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MediaError::ImageError(msg) => write!(f, "Image error: {}", msg),
            MediaError::Cancelled => write!(f, "Operation cancelled by user"),
            MediaError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MediaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MediaError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MediaError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => MediaError::TruncatedData,
            _ => MediaError::IoError(error),
        }
    }
}

impl From<String> for MediaError {
    fn from(msg: String) -> Self {
        MediaError::GenericError(msg)
    }
}

impl From<image::ImageError> for MediaError {
    fn from(error: image::ImageError) -> Self {
        MediaError::ImageError(error.to_string())
    }
}

/// Result type for extractor and organizer operations
pub type MediaResult<T> = Result<T, MediaError>;
