//! Buffers and directories shared by the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// Little-endian TIFF with a single DateTimeOriginal entry
pub fn tiff_with_date(value: &str) -> Vec<u8> {
    let mut buffer = Vec::new();

    // Header
    buffer.extend_from_slice(b"II");
    buffer.extend_from_slice(&[42, 0]);
    buffer.extend_from_slice(&[8, 0, 0, 0]);

    // IFD0 with one entry
    buffer.extend_from_slice(&[1, 0]);
    buffer.extend_from_slice(&[0x03, 0x90]);  // DateTimeOriginal
    buffer.extend_from_slice(&[2, 0]);        // ASCII
    buffer.extend_from_slice(&[20, 0, 0, 0]); // Count
    buffer.extend_from_slice(&[26, 0, 0, 0]); // Value offset
    buffer.extend_from_slice(&[0, 0, 0, 0]);  // No next IFD

    buffer.extend_from_slice(value.as_bytes());
    buffer.push(0);
    buffer
}

/// Exif APP1 segment wrapping `tiff`
pub fn exif_app1(tiff: &[u8]) -> Vec<u8> {
    let length = (2 + 6 + tiff.len()) as u16;
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&length.to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(tiff);
    segment
}

/// A decodable JPEG with an Exif DateTimeOriginal
pub fn real_jpeg_with_date(value: &str) -> Vec<u8> {
    let image = RgbImage::from_fn(32, 24, |x, y| Rgb([(x * 8) as u8, (y * 10) as u8, 128]));
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, 95).encode_image(&image).unwrap();

    let mut jpeg = encoded[..2].to_vec();
    jpeg.extend(exif_app1(&tiff_with_date(value)));
    jpeg.extend_from_slice(&encoded[2..]);
    jpeg
}

/// Writes `data` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, data).unwrap();
    path
}
