//! Organizer pipeline tests against scratch directories

mod common;

use std::fs;

use organize_media::{MediaError, MediaOrganizer, OrganizeParams};

use common::{date, init_logging, real_jpeg_with_date, tiff_with_date, write_file};

#[test]
fn test_copies_into_dated_folders() {
    init_logging();
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();

    write_file(src.path(), "IMG_0001.jpg", &real_jpeg_with_date("2023:06:15 14:30:45"));
    write_file(src.path(), "raw/DSC_0002.NEF", &tiff_with_date("2021:01:02 03:04:05"));
    write_file(src.path(), "notes.txt", b"2020:01:01 00:00:00");

    let organizer = MediaOrganizer::new();
    let summary = organizer.organize(&OrganizeParams::new(src.path(), dest.path())).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.copied, 2);
    assert_eq!(summary.compressed, 0);
    assert!(dest.path().join("2023/06-15/IMG_0001.jpg").is_file());
    assert!(dest.path().join("2021/01-02/DSC_0002.NEF").is_file());
    assert!(!dest.path().join("test_write.tmp").exists());

    // Sources stay without --delete
    assert!(src.path().join("IMG_0001.jpg").is_file());
}

#[test]
fn test_existing_destination_is_skipped() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_file(src.path(), "a.dng", &tiff_with_date("2020:02:20 20:20:20"));
    let existing = write_file(dest.path(), "2020/02-20/a.dng", b"already here");

    let summary = MediaOrganizer::new()
        .organize(&OrganizeParams::new(src.path(), dest.path()))
        .unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.processed, 0);
    assert_eq!(fs::read(existing).unwrap(), b"already here");
}

#[test]
fn test_delete_source_after_copy() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let file = write_file(src.path(), "b.arw", &tiff_with_date("2019:09:19 19:19:19"));

    let params = OrganizeParams::new(src.path(), dest.path()).with_delete_source(true);
    let summary = MediaOrganizer::new().organize(&params).unwrap();

    assert_eq!(summary.deleted, 1);
    assert!(!file.exists());
    assert!(dest.path().join("2019/09-19/b.arw").is_file());
}

#[test]
fn test_compression_keeps_capture_date() {
    init_logging();
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_file(src.path(), "photo.jpg", &real_jpeg_with_date("2022:12:31 23:59:00"));
    write_file(src.path(), "raw.cr2", &tiff_with_date("2022:12:31 10:00:00"));

    let organizer = MediaOrganizer::new();
    let params = OrganizeParams::new(src.path(), dest.path()).with_compression(Some(40));
    let summary = organizer.organize(&params).unwrap();

    assert_eq!(summary.compressed, 1);
    assert_eq!(summary.copied, 1);
    assert_eq!(summary.processed, 2);

    let output = dest.path().join("2022/12-31/photo.jpg");
    assert!(image::open(&output).is_ok());
    assert_eq!(organizer.extract_date(&output).unwrap(), date(2022, 12, 31, 23, 59, 0));
}

#[test]
fn test_undated_files_are_counted_and_left() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let blank = write_file(src.path(), "blank.nef", &[0u8; 512]);
    write_file(src.path(), "dated.nef", &tiff_with_date("2005:05:05 05:05:05"));

    let params = OrganizeParams::new(src.path(), dest.path()).with_delete_source(true);
    let summary = MediaOrganizer::new().organize(&params).unwrap();

    assert_eq!(summary.undated, 1);
    assert_eq!(summary.processed, 1);
    assert!(blank.exists());
}

#[test]
fn test_empty_source_is_rejected() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    write_file(src.path(), "clip.mp4", b"....");

    let result = MediaOrganizer::new().organize(&OrganizeParams::new(src.path(), dest.path()));
    assert!(matches!(result, Err(MediaError::GenericError(_))));
}

#[test]
fn test_missing_destination_is_rejected() {
    let src = tempfile::tempdir().unwrap();
    write_file(src.path(), "a.jpg", b"x");

    let result = MediaOrganizer::new().organize(&OrganizeParams::new(src.path(), src.path().join("missing")));
    assert!(matches!(result, Err(MediaError::ConfigError(_))));
}

#[test]
fn test_formats_file_adds_extension() {
    let dir = tempfile::tempdir().unwrap();
    let formats = write_file(dir.path(), "formats.toml", b"supported = [\"orf\"]\n[offsets]\norf = [0, 12]\n");

    let organizer = MediaOrganizer::with_formats_file(&formats).unwrap();
    assert!(organizer.registry().is_supported(".orf"));
    assert!(organizer.registry().is_supported(".jpg"));

    let mut buffer = vec![0xEE; 12];
    buffer.extend(tiff_with_date("2008:08:08 08:08:08"));
    let file = write_file(dir.path(), "P1.ORF", &buffer);
    assert_eq!(organizer.extract_date(&file).unwrap(), date(2008, 8, 8, 8, 8, 8));
}
