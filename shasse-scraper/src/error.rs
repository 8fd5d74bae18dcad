/// Errors that can occur during scraping operations.
///
/// A page that parses but yields no methods is not an error; see
/// [`LogEntry::NoData`](crate::log::LogEntry::NoData).
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Pokémon not found on the {generation}G portal: {name}")]
    NotInPortal { name: String, generation: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
