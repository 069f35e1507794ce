//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, echoing every record to the console and, when
//! enabled, to a timestamped file under `./logs/`.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use chrono::Local;
use log::{Log, Record, Metadata, LevelFilter};

/// Directory the log files are written to
pub const LOG_DIR: &str = "logs";

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output, if file logging is enabled
    file: Mutex<Option<File>>,
    /// Most verbose level that gets through
    level: LevelFilter,
}

impl Logger {
    /// Creates a console-only logger
    pub fn console(level: LevelFilter) -> Self {
        Logger {
            file: Mutex::new(None),
            level,
        }
    }

    /// Creates a logger that also writes to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    /// * `level` - Most verbose level to record
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &Path, level: LevelFilter) -> io::Result<Self> {
        let mut file = File::create(log_file)?;
        writeln!(file, "Log initialized at {}", Local::now().to_rfc2822())?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Path of a fresh log file in `dir`, named after the current time
    pub fn timestamped_path(dir: &Path) -> PathBuf {
        dir.join(format!("{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S")))
    }

    /// Writes a line to the log file, if there is one
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;

        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Static method to initialize the global logger
    ///
    /// With `enable_file` the log also goes to `./logs/<timestamp>.log`.
    /// Returns the path of that file.
    pub fn init_global_logger(enable_file: bool, verbose: bool) -> io::Result<Option<PathBuf>> {
        let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

        let (global_logger, path) = if enable_file {
            let dir = Path::new(LOG_DIR);
            fs::create_dir_all(dir)?;
            let path = Self::timestamped_path(dir);
            (Logger::new(&path, level)?, Some(path))
        } else {
            (Logger::console(level), None)
        };

        // Only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(path)
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("{} [{}] {}",
                                  Local::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.args());
            let _ = self.write_line(&message);

            // Also print to console
            println!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in write_line
    }
}
