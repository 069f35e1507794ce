//! Exif date/time parsing
//!
//! Exif stores capture times as naive local-time strings with the fixed
//! layout `YYYY:MM:DD HH:MM:SS`. No timezone can be recovered from them, so
//! they are returned as `NaiveDateTime`.

use chrono::{Datelike, NaiveDateTime};

/// `chrono` format of an Exif date/time string
pub const EXIF_DATE_TIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Length of an Exif date/time string without its NUL terminator
pub const EXIF_DATE_TIME_LEN: usize = 19;

/// Earliest year accepted as a real capture date
pub const MIN_PLAUSIBLE_YEAR: i32 = 1990;

/// Latest year accepted as a real capture date
pub const MAX_PLAUSIBLE_YEAR: i32 = 2100;

// Byte positions of the separators in `YYYY:MM:DD HH:MM:SS`
const SEPARATORS: [(usize, u8); 5] = [(4, b':'), (7, b':'), (10, b' '), (13, b':'), (16, b':')];

/// Checks the punctuation of a candidate window without parsing it
pub fn has_date_time_shape(bytes: &[u8]) -> bool {
    bytes.len() >= EXIF_DATE_TIME_LEN
        && SEPARATORS.iter().all(|&(index, separator)| bytes[index] == separator)
}

/// Whether a year falls inside the plausible capture range (inclusive)
pub fn is_plausible_year(year: i32) -> bool {
    (MIN_PLAUSIBLE_YEAR..=MAX_PLAUSIBLE_YEAR).contains(&year)
}

/// Parses the first 19 bytes as an Exif date/time
///
/// Every non-separator position must be an ASCII digit, the calendar values
/// must be valid and the year plausible. Anything else yields `None`.
pub fn parse_exif_date_time(bytes: &[u8]) -> Option<NaiveDateTime> {
    let field = bytes.get(..EXIF_DATE_TIME_LEN)?;
    if !has_date_time_shape(field) {
        return None;
    }

    let digits_ok = field
        .iter()
        .enumerate()
        .filter(|(index, _)| !SEPARATORS.iter().any(|&(pos, _)| pos == *index))
        .all(|(_, byte)| byte.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let text = std::str::from_utf8(field).ok()?;
    let date = NaiveDateTime::parse_from_str(text, EXIF_DATE_TIME_FORMAT).ok()?;

    is_plausible_year(date.year()).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parses_exif_layout() {
        let date = parse_exif_date_time(b"2023:06:15 14:30:45\0").unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap().and_hms_opt(14, 30, 45).unwrap();
        assert_eq!(date, expected);
    }

    #[test]
    fn test_rejects_wrong_shape() {
        assert!(parse_exif_date_time(b"2023-06-15 14:30:45").is_none());
        assert!(parse_exif_date_time(b"2023:06:15T14:30:45").is_none());
        assert!(parse_exif_date_time(b"2023:06:15 14:30").is_none());
    }

    #[test]
    fn test_rejects_blank_and_zero_dates() {
        // Cameras without a clock write these
        assert!(parse_exif_date_time(b"    :  :     :  :  ").is_none());
        assert!(parse_exif_date_time(b"0000:00:00 00:00:00").is_none());
    }

    #[test]
    fn test_rejects_impossible_calendar_values() {
        assert!(parse_exif_date_time(b"2023:13:01 00:00:00").is_none());
        assert!(parse_exif_date_time(b"2023:02:30 00:00:00").is_none());
        assert!(parse_exif_date_time(b"2023:01:01 25:00:00").is_none());
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        assert!(parse_exif_date_time(b"1990:01:01 00:00:00").is_some());
        assert!(parse_exif_date_time(b"2100:12:31 23:59:59").is_some());
        assert!(parse_exif_date_time(b"1989:12:31 23:59:59").is_none());
        assert!(parse_exif_date_time(b"2101:01:01 00:00:00").is_none());
    }

    #[test]
    fn test_shape_check_needs_full_length() {
        assert!(has_date_time_shape(b"2020:05:15 14:30:25"));
        assert!(!has_date_time_shape(b"2020:05:15 14:30"));
        assert!(has_date_time_shape(b"abcd:ef:gh ij:kl:mn"));
    }
}
