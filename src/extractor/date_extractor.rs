//! Extraction orchestrator
//!
//! Runs the locators planned for a file extension in order, rewinding the
//! reader before each one, and returns the first date found.

use chrono::NaiveDateTime;
use log::{debug, info};
use std::io::{Cursor, Seek, SeekFrom};

use crate::errors::{MediaError, MediaResult};

use super::formats::FormatRegistry;
use super::locator_strategy::{LocatorStrategy, LocatorStrategyFactory};

/// Facade picking and running locator strategies for a buffer
///
/// Holds only a reference to the format table, so one extractor can serve
/// any number of buffers, from any number of threads.
#[derive(Clone, Copy)]
pub struct DateExtractor<'a> {
    /// Format table used to plan strategies
    registry: &'a FormatRegistry,
}

impl DateExtractor<'static> {
    /// Extractor backed by the built-in format table
    pub fn builtin() -> Self {
        DateExtractor::new(FormatRegistry::builtin())
    }
}

impl<'a> DateExtractor<'a> {
    /// Create an extractor over the given format table
    pub fn new(registry: &'a FormatRegistry) -> Self {
        DateExtractor { registry }
    }

    /// The format table in use
    pub fn registry(&self) -> &'a FormatRegistry {
        self.registry
    }

    /// Strategies to try for an extension, in order
    pub fn strategies_for(&self, extension: &str) -> MediaResult<Vec<Box<dyn LocatorStrategy>>> {
        let plan = self.registry.plan(extension)?;
        Ok(plan.iter().map(LocatorStrategyFactory::create_strategy).collect())
    }

    /// Extracts the capture date from a complete file buffer
    ///
    /// # Arguments
    /// * `buffer` - The whole file content
    /// * `extension` - File extension including the dot, any case (`.JPG`)
    ///
    /// # Returns
    /// The first date any strategy finds, `UnsupportedFormat` for excluded
    /// extensions, or `NoDateTimeInformation` when every strategy failed
    pub fn extract(&self, buffer: &[u8], extension: &str) -> MediaResult<NaiveDateTime> {
        let strategies = self.strategies_for(extension)?;
        let mut reader = Cursor::new(buffer);

        for strategy in &strategies {
            reader.seek(SeekFrom::Start(0))?;

            match strategy.locate(&mut reader) {
                Ok(date) => {
                    info!("Extracted {} using {} strategy", date, strategy.name());
                    return Ok(date);
                },
                Err(e) => debug!("{} strategy failed: {}", strategy.name(), e),
            }
        }

        Err(MediaError::NoDateTimeInformation)
    }
}
