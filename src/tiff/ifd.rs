//! Image File Directory (IFD) structures
//!
//! An IFD is a count followed by fixed 12-byte tag entries. Small values are
//! stored inline in the entry; anything longer than four bytes lives elsewhere
//! and the entry holds its offset relative to the TIFF header.

use std::fmt;
use log::trace;

use crate::tiff::constants::{field_types, tags};

/// Represents an Image File Directory (IFD)
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD
    pub entries: Vec<IFDEntry>,
    /// IFD number (0 for the main directory, 1 for the Exif sub-IFD)
    pub number: usize,
    /// Offset to this IFD, relative to the TIFF header
    pub offset: u32,
    /// Set when the data ended before all announced entries were read
    pub truncated: bool,
}

/// Represents an entry in an Image File Directory (IFD)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u32,
    /// Value or offset to values
    pub value_offset: u32,
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u32, value_offset: u32) -> Self {
        Self {
            tag,
            field_type,
            count,
            value_offset,
        }
    }

    /// Get the size in bytes for this entry's field type
    pub fn get_field_type_size(&self) -> u64 {
        match self.field_type {
            field_types::BYTE | field_types::ASCII | field_types::SBYTE | field_types::UNDEFINED => 1,
            field_types::SHORT | field_types::SSHORT => 2,
            field_types::LONG | field_types::SLONG | field_types::FLOAT | field_types::IFD => 4,
            field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE => 8,
            _ => 1,
        }
    }

    /// Whether the value fits in the entry itself instead of living at an offset
    pub fn is_value_inline(&self) -> bool {
        self.get_field_type_size() * u64::from(self.count) <= 4
    }

    /// Whether this is one of the Exif date/time tags
    pub fn is_date_tag(&self) -> bool {
        tags::DATE_TAG_PRIORITY.contains(&self.tag)
    }

    /// A date/time entry worth reading: ASCII, and too long to be stored inline
    ///
    /// Inline strings hold at most four bytes, which cannot be a
    /// `YYYY:MM:DD HH:MM:SS` value.
    pub fn is_date_candidate(&self) -> bool {
        let candidate = self.is_date_tag()
            && self.field_type == field_types::ASCII
            && !self.is_value_inline();

        if self.is_date_tag() && !candidate {
            trace!("Skipping {}: type={}, count={}", tags::name(self.tag), self.field_type, self.count);
        }

        candidate
    }

    /// Position of the tag in the preference order, lower is better
    pub fn date_priority(&self) -> usize {
        tags::DATE_TAG_PRIORITY
            .iter()
            .position(|&t| t == self.tag)
            .unwrap_or(tags::DATE_TAG_PRIORITY.len())
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        format!("Tag: {:#06x} ({}), Type: {}, Count: {}, Value/Offset: {}",
                self.tag, tags::name(self.tag), self.field_type, self.count, self.value_offset)
    }
}

impl IFD {
    /// Creates a new, empty IFD
    pub fn new(number: usize, offset: u32) -> Self {
        Self {
            entries: Vec::new(),
            number,
            offset,
            truncated: false,
        }
    }

    /// Adds an entry to this IFD
    pub fn add_entry(&mut self, entry: IFDEntry) {
        trace!("Adding entry to IFD #{}: {}", self.number, entry.description());
        self.entries.push(entry);
    }

    /// Gets the first IFD entry with the given tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// Entries that may hold a readable capture date, in directory order
    pub fn date_candidates(&self) -> impl Iterator<Item = &IFDEntry> {
        self.entries.iter().filter(|entry| entry.is_date_candidate())
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "    {}", entry.description())?;
        }
        Ok(())
    }
}
