//! TIFF format constants
//!
//! Only the parts of the TIFF/Exif vocabulary the date reader touches.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// Byte order + magic + first IFD offset
    pub const HEADER_SIZE: u32 = 8;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const IFD: u16 = 13;       // 32-bit IFD offset
}

/// Tags the date reader cares about
pub mod tags {
    pub const DATE_TIME: u16 = 0x0132;            // File change date/time
    pub const EXIF_IFD_POINTER: u16 = 0x8769;     // Offset of the Exif sub-IFD
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;   // When the photo was taken
    pub const DATE_TIME_DIGITIZED: u16 = 0x9004;  // When the photo was digitized

    /// Date tags in the order they are preferred
    pub const DATE_TAG_PRIORITY: [u16; 3] = [DATE_TIME_ORIGINAL, DATE_TIME_DIGITIZED, DATE_TIME];

    /// Returns a readable name for the tags listed above
    pub fn name(tag: u16) -> &'static str {
        match tag {
            DATE_TIME => "DateTime",
            EXIF_IFD_POINTER => "ExifIFDPointer",
            DATE_TIME_ORIGINAL => "DateTimeOriginal",
            DATE_TIME_DIGITIZED => "DateTimeDigitized",
            _ => "Unknown",
        }
    }
}
