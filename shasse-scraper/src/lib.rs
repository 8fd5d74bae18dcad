//! Scraping and extraction of shiny-hunting data from the Pokébip wiki.
//!
//! The extraction pipeline is pure and synchronous: [`cell`] -> [`classify`]
//! -> [`normalize`] -> [`validate`] -> [`dedup`], driven per page by
//! [`extract`]. Fetching, media and orchestration live in [`client`],
//! [`media`] and [`scrape`].

pub mod cell;
pub mod classify;
pub mod client;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod log;
pub mod media;
pub mod normalize;
pub mod portal;
pub mod scrape;
pub mod shiny_lock;
pub mod urls;
pub mod validate;

pub use cell::RawCell;
pub use classify::{CellKind, classify, classify_cell};
pub use client::{PageSource, PokebipClient};
pub use config::{ConfigSources, ScraperConfig, ValueSource, config_path, save_default};
pub use dedup::{DedupOutcome, completeness_score, dedupe};
pub use error::ScrapeError;
pub use extract::{ExtractionReport, PageExtraction, RejectedRow, extract, extract_html};
pub use log::{LogEntry, LogSummary, ScrapeLog};
pub use normalize::{NormalizedRow, RowContext, normalize, normalize_row};
pub use portal::parse_portal;
pub use scrape::{
    PokemonScrape, ScrapeEvent, ScrapeOptions, ScrapeResult, fetch_portal, find_in_portal,
    scrape_entries, scrape_generation, scrape_pokemon,
};
pub use shiny_lock::{detect_shiny_lock, detect_shiny_lock_html};
pub use validate::{Rejection, check, is_valid};
