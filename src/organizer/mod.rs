//! File-processing pipeline
//!
//! Walks a source tree, reads each media file's capture date and copies (or
//! recompresses) it into `<dest>/YYYY/MM-DD/`.

pub mod params;
pub mod walker;
pub mod processor;
pub mod summary;

pub use params::OrganizeParams;
pub use processor::{check_destination_writable, destination_path, FileOutcome, MediaProcessor};
pub use summary::ProcessingSummary;
pub use walker::{collect_media_files, count_media_files};
