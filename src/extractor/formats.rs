//! Format table driving the extraction strategies
//!
//! Which locators run for an extension, and which byte offsets the offset
//! scanner probes, is data loaded from TOML. Supporting a new vendor RAW
//! layout means adding a line to `formats.toml` (or to a user file passed
//! with `--formats`), not writing code.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use lazy_static::lazy_static;
use log::{debug, warn};

use crate::errors::{MediaError, MediaResult};

lazy_static! {
    // Parse the embedded table once
    static ref BUILTIN_FORMATS: FormatRegistry = {
        let content = include_str!("../../formats.toml");
        FormatRegistry::parse(content).unwrap_or_else(|e| {
            warn!("Failed to parse built-in format table: {}", e);
            FormatRegistry::default()
        })
    };
}

/// A locator the orchestrator can run, in the order it should run them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorKind {
    /// Exif APP1 segment inside a JPEG
    Jpeg,
    /// TIFF header at byte 0
    PlainTiff,
    /// TIFF header at one of the given offsets
    OffsetScan(Vec<u64>),
    /// Textual date anywhere in the first MiB
    Scan,
}

/// Extension classes and per-extension offset tables
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    /// Extensions the organizer processes
    supported: BTreeSet<String>,
    /// Extensions that get the JPEG locator
    jpeg: BTreeSet<String>,
    /// Extensions that always fail (video containers)
    unsupported: BTreeSet<String>,
    /// Offsets probed when an extension has no table of its own
    default_offsets: Vec<u64>,
    /// Per-extension offsets for the offset scanner
    offsets: HashMap<String, Vec<u64>>,
}

impl FormatRegistry {
    /// The table compiled into the binary
    pub fn builtin() -> &'static FormatRegistry {
        &BUILTIN_FORMATS
    }

    /// Parse a format table from a TOML string
    pub fn parse(content: &str) -> MediaResult<Self> {
        let mut registry = FormatRegistry::default();
        registry.merge_str(content)?;
        Ok(registry)
    }

    /// The built-in table with a user file merged on top
    pub fn load(path: &Path) -> MediaResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut registry = FormatRegistry::builtin().clone();
        registry.merge_str(&content)?;
        debug!("Merged format table from {}", path.display());
        Ok(registry)
    }

    /// Merges a TOML table into this registry
    ///
    /// Extension lists are added to, `default_offsets` and per-extension
    /// offset tables replace what was there.
    pub fn merge_str(&mut self, content: &str) -> MediaResult<()> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| MediaError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        self.supported.extend(Self::parse_extension_list(&toml_value, "supported")?);
        self.jpeg.extend(Self::parse_extension_list(&toml_value, "jpeg")?);
        self.unsupported.extend(Self::parse_extension_list(&toml_value, "unsupported")?);

        if let Some(value) = toml_value.get("default_offsets") {
            self.default_offsets = Self::parse_offsets(value, "default_offsets")?;
        }

        if let Some(value) = toml_value.get("offsets") {
            let table = value
                .as_table()
                .ok_or_else(|| MediaError::ConfigError("'offsets' must be a table".to_string()))?;
            for (extension, offsets) in table {
                let offsets = Self::parse_offsets(offsets, extension)?;
                self.offsets.insert(normalize_extension(extension), offsets);
            }
        }

        Ok(())
    }

    fn parse_extension_list(toml_value: &toml::Value, key: &str) -> MediaResult<Vec<String>> {
        let Some(value) = toml_value.get(key) else {
            return Ok(Vec::new());
        };

        let array = value
            .as_array()
            .ok_or_else(|| MediaError::ConfigError(format!("'{}' must be an array", key)))?;

        array
            .iter()
            .map(|item| {
                item.as_str()
                    .map(normalize_extension)
                    .ok_or_else(|| MediaError::ConfigError(format!("'{}' must only hold strings", key)))
            })
            .collect()
    }

    fn parse_offsets(value: &toml::Value, key: &str) -> MediaResult<Vec<u64>> {
        let array = value
            .as_array()
            .ok_or_else(|| MediaError::ConfigError(format!("offsets for '{}' must be an array", key)))?;

        array
            .iter()
            .map(|item| {
                item.as_integer()
                    .and_then(|offset| u64::try_from(offset).ok())
                    .ok_or_else(|| MediaError::ConfigError(
                        format!("offsets for '{}' must be non-negative integers", key)))
            })
            .collect()
    }

    /// Whether the organizer should pick up files with this extension
    pub fn is_supported(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        self.supported.contains(&extension) && !self.unsupported.contains(&extension)
    }

    /// Whether the extension is a JPEG
    pub fn is_jpeg(&self, extension: &str) -> bool {
        self.jpeg.contains(&normalize_extension(extension))
    }

    /// Whether the extension is explicitly excluded (video containers)
    pub fn is_unsupported(&self, extension: &str) -> bool {
        self.unsupported.contains(&normalize_extension(extension))
    }

    /// Candidate TIFF header offsets for the extension
    pub fn offsets_for(&self, extension: &str) -> &[u64] {
        self.offsets
            .get(&normalize_extension(extension))
            .unwrap_or(&self.default_offsets)
    }

    /// Ordered locators to try for a file with the given extension
    pub fn plan(&self, extension: &str) -> MediaResult<Vec<LocatorKind>> {
        if self.is_unsupported(extension) {
            return Err(MediaError::UnsupportedFormat(extension.to_string()));
        }

        let mut plan = Vec::with_capacity(4);
        if self.is_jpeg(extension) {
            plan.push(LocatorKind::Jpeg);
        }
        plan.push(LocatorKind::PlainTiff);
        plan.push(LocatorKind::OffsetScan(self.offsets_for(extension).to_vec()));
        plan.push(LocatorKind::Scan);

        Ok(plan)
    }
}

/// Lowercases an extension and strips its leading dot: `.JPG` becomes `jpg`
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}

/// Extension of a path in the form the extractor takes (`.jpg`), or ""
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_offsets() {
        let registry = FormatRegistry::builtin();
        assert_eq!(registry.offsets_for(".cr2"), &[0, 8, 16]);
        assert_eq!(registry.offsets_for(".ARW"), &[0, 4, 8, 12]);
        assert_eq!(registry.offsets_for(".nef"), &[0, 4, 8]);
        assert_eq!(registry.offsets_for(".xyz"), &[0, 4, 8]);
    }

    #[test]
    fn test_builtin_extension_classes() {
        let registry = FormatRegistry::builtin();
        for ext in [".jpg", ".jpeg", ".nef", ".cr2", ".cr3", ".arw", ".dng", ".raw", ".heic", ".heif", ".raf", ".rw2"] {
            assert!(registry.is_supported(ext), "{} should be supported", ext);
        }
        assert!(registry.is_jpeg(".JPEG"));
        assert!(!registry.is_jpeg(".nef"));
        assert!(registry.is_unsupported(".mp4"));
        assert!(registry.is_unsupported(".MOV"));
        assert!(!registry.is_supported(".mov"));
    }

    #[test]
    fn test_plan_order() {
        let registry = FormatRegistry::builtin();

        let jpeg = registry.plan(".jpg").unwrap();
        assert_eq!(jpeg, vec![
            LocatorKind::Jpeg,
            LocatorKind::PlainTiff,
            LocatorKind::OffsetScan(vec![0, 4, 8]),
            LocatorKind::Scan,
        ]);

        let cr2 = registry.plan(".cr2").unwrap();
        assert_eq!(cr2, vec![
            LocatorKind::PlainTiff,
            LocatorKind::OffsetScan(vec![0, 8, 16]),
            LocatorKind::Scan,
        ]);

        assert!(matches!(registry.plan(".qt"), Err(MediaError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_merge_adds_and_replaces() {
        let mut registry = FormatRegistry::builtin().clone();
        registry.merge_str(r#"
            supported = ["orf"]
            [offsets]
            orf = [0, 12]
            cr2 = [16]
        "#).unwrap();

        assert!(registry.is_supported(".orf"));
        assert!(registry.is_supported(".jpg"));
        assert_eq!(registry.offsets_for(".orf"), &[0, 12]);
        assert_eq!(registry.offsets_for(".cr2"), &[16]);
    }

    #[test]
    fn test_rejects_negative_offsets() {
        let result = FormatRegistry::parse("default_offsets = [0, -4]");
        assert!(matches!(result, Err(MediaError::ConfigError(_))));
    }

    #[test]
    fn test_extension_helpers() {
        assert_eq!(normalize_extension(".JPG"), "jpg");
        assert_eq!(normalize_extension("cr2"), "cr2");
        assert_eq!(extension_of(Path::new("/a/b/IMG_001.NEF")), ".nef");
        assert_eq!(extension_of(Path::new("/a/b/README")), "");
    }
}
