pub mod errors;
pub mod io;
pub mod tiff;
pub mod utils;
pub mod extractor;
pub mod organizer;
pub mod commands;
pub mod api;

pub use crate::api::MediaOrganizer;
pub use crate::errors::{MediaError, MediaResult};

pub use extractor::{extract_date_time, DateExtractor, FormatRegistry};
pub use organizer::{OrganizeParams, ProcessingSummary};
