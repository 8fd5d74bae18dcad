//! Shiny-hunting data model types and JSON export files.
//!
//! This crate defines the records produced by page extraction without any
//! scraping or database dependencies. Consumers can use these types directly
//! for serialization, display, or passing to `shasse-db` for persistence.

pub mod json;
pub mod types;

pub use json::{ExportError, ExportFile, load_export, save_export};
pub use types::*;
