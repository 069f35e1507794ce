//! Run configuration for the organizer

use std::path::PathBuf;

use crate::errors::{MediaError, MediaResult};

/// Highest JPEG quality accepted for recompression
pub const MAX_QUALITY: u8 = 100;

/// Everything one organize run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeParams {
    /// Directory walked for media files
    pub source: PathBuf,
    /// Root of the date-partitioned tree
    pub destination: PathBuf,
    /// JPEG quality to recompress with, `None` copies files unchanged
    pub compression: Option<u8>,
    /// Remove each source file after it has been written
    pub delete_source: bool,
    /// Do not ask for confirmation before processing
    pub skip_confirmation: bool,
    /// Also write the log to `./logs/`
    pub enable_log: bool,
    /// Draw a progress bar while processing
    pub show_progress: bool,
}

impl OrganizeParams {
    /// Params with every option off
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        OrganizeParams {
            source: source.into(),
            destination: destination.into(),
            compression: None,
            delete_source: false,
            skip_confirmation: false,
            enable_log: false,
            show_progress: false,
        }
    }

    pub fn with_compression(mut self, quality: Option<u8>) -> Self {
        self.compression = quality;
        self
    }

    pub fn with_delete_source(mut self, delete_source: bool) -> Self {
        self.delete_source = delete_source;
        self
    }

    /// Checks that both directories exist and the quality is in range
    pub fn validate(&self) -> MediaResult<()> {
        if !self.source.is_dir() {
            return Err(MediaError::ConfigError(format!(
                "source directory does not exist: {}", self.source.display())));
        }

        if !self.destination.is_dir() {
            return Err(MediaError::ConfigError(format!(
                "destination directory does not exist: {}", self.destination.display())));
        }

        if let Some(quality) = self.compression {
            if quality > MAX_QUALITY {
                return Err(MediaError::ConfigError(
                    "compression level must be an integer between 0 and 100".to_string()));
            }
        }

        Ok(())
    }
}

/// Parses a `--compression` value
///
/// `-1` means no recompression, as does an absent flag.
pub fn parse_compression(value: &str) -> MediaResult<Option<u8>> {
    let level: i32 = value.trim().parse().map_err(|_| {
        MediaError::ConfigError(format!("Invalid compression level: {}", value))
    })?;

    match level {
        -1 => Ok(None),
        0..=100 => Ok(u8::try_from(level).ok()),
        _ => Err(MediaError::ConfigError(
            "compression level must be an integer between 0 and 100".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compression() {
        assert_eq!(parse_compression("80").unwrap(), Some(80));
        assert_eq!(parse_compression("0").unwrap(), Some(0));
        assert_eq!(parse_compression("-1").unwrap(), None);
        assert!(parse_compression("101").is_err());
        assert!(parse_compression("-2").is_err());
        assert!(parse_compression("high").is_err());
    }

    #[test]
    fn test_validate_directories() {
        let dir = tempfile::tempdir().unwrap();
        let ok = OrganizeParams::new(dir.path(), dir.path());
        assert!(ok.validate().is_ok());

        let missing = OrganizeParams::new(dir.path().join("nope"), dir.path());
        assert!(matches!(missing.validate(), Err(MediaError::ConfigError(_))));

        let bad_quality = OrganizeParams::new(dir.path(), dir.path()).with_compression(Some(101));
        assert!(bad_quality.validate().is_err());
    }
}
