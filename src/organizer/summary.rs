//! Counters reported at the end of a run

use std::fmt;
use log::info;

/// Totals for one organize run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Files written to the destination
    pub processed: usize,
    /// Files written unchanged
    pub copied: usize,
    /// JPEGs re-encoded before writing
    pub compressed: usize,
    /// Files whose destination already existed
    pub skipped: usize,
    /// Source files removed after writing
    pub deleted: usize,
    /// Files without a readable capture date
    pub undated: usize,
}

impl ProcessingSummary {
    /// Writes the summary through the logger
    pub fn log(&self) {
        info!("Processing Summary:");
        info!("{} files have been successfully processed", self.processed);
        info!("Number of files copied: {}", self.copied);
        info!("Number of files compressed: {}", self.compressed);
        info!("Number of files deleted: {}", self.deleted);
        info!("Number of files skipped: {}", self.skipped);
        info!("Number of files without date: {}", self.undated);
    }
}

impl fmt::Display for ProcessingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "processed={} copied={} compressed={} skipped={} deleted={} undated={}",
               self.processed, self.copied, self.compressed, self.skipped, self.deleted, self.undated)
    }
}
