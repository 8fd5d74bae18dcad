use std::path::PathBuf;

use futures::stream::{self, StreamExt};
use scraper::Html;
use shasse_catalog::{PokemonEntry, ScrapedPokemon, ShinyLock};
use shasse_core::Generation;
use tokio::sync::mpsc;

use crate::client::PageSource;
use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extract::{ExtractionReport, extract, page_text};
use crate::log::{LogEntry, ScrapeLog};
use crate::media::{self, MediaKind};
use crate::portal::{find_entry, parse_portal};
use crate::shiny_lock::detect_shiny_lock;
use crate::urls::{details_url, portal_url};

/// Options for a scraping session.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub base_url: String,
    /// Root directory for sprites and artwork.
    pub assets_dir: PathBuf,
    /// Pokémon pages processed concurrently.
    pub workers: usize,
    /// Download sprites and artwork.
    pub download_media: bool,
    /// Maximum number of Pokémon to process per generation.
    pub limit: Option<usize>,
}

impl ScrapeOptions {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            assets_dir: config.assets_dir.clone(),
            workers: config.workers,
            download_media: true,
            limit: None,
        }
    }
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self::from_config(&ScraperConfig::default())
    }
}

/// Progress events emitted during scraping, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum ScrapeEvent {
    /// Fetching a generation portal.
    FetchingPortal { generation: Generation },
    /// Portal parsed, total Pokémon found.
    PortalLoaded { generation: Generation, total: usize },
    /// A Pokémon has started processing (assigned to a worker).
    PokemonStarted { index: usize, name: String },
    /// Downloading one kind of media for a Pokémon.
    PokemonDownloading {
        index: usize,
        name: String,
        kind: MediaKind,
    },
    /// Pokémon page scraped with at least one method.
    PokemonCompleted {
        index: usize,
        name: String,
        methods: usize,
        shiny_lock: ShinyLock,
    },
    /// Page fetched but nothing extracted.
    PokemonNoData { index: usize, name: String },
    /// Fetching the page failed (non-fatal for the session).
    PokemonFailed {
        index: usize,
        name: String,
        reason: String,
    },
    /// All Pokémon processed.
    Done,
}

/// Result of scraping one generation.
#[derive(Debug, Default)]
pub struct ScrapeResult {
    /// Scraped Pokémon in portal order, including those with no data.
    pub pokemon: Vec<ScrapedPokemon>,
    pub log: ScrapeLog,
}

/// One Pokémon page, scraped.
#[derive(Debug, Clone)]
pub struct PokemonScrape {
    pub pokemon: ScrapedPokemon,
    pub report: ExtractionReport,
    pub url: String,
    pub media_downloaded: Vec<String>,
}

/// Fetch and parse a generation portal.
pub async fn fetch_portal<S: PageSource>(
    source: &S,
    base_url: &str,
    generation: Generation,
) -> Result<Vec<PokemonEntry>, ScrapeError> {
    let html = source.fetch_page(&portal_url(base_url, generation)).await?;
    let document = Html::parse_document(&html);
    Ok(parse_portal(&document, generation))
}

/// Look a Pokémon up on its generation portal by name.
pub async fn find_in_portal<S: PageSource>(
    source: &S,
    base_url: &str,
    name: &str,
    generation: Generation,
) -> Result<PokemonEntry, ScrapeError> {
    let entries = fetch_portal(source, base_url, generation).await?;
    find_entry(&entries, name)
        .cloned()
        .ok_or_else(|| ScrapeError::NotInPortal {
            name: name.to_string(),
            generation: generation.number(),
        })
}

/// Scrape one Pokémon: fetch its page, extract methods, detect shiny lock,
/// and download media.
///
/// Media failures are logged and never fail the Pokémon.
pub async fn scrape_pokemon<S: PageSource>(
    source: &S,
    entry: &PokemonEntry,
    options: &ScrapeOptions,
    index: usize,
    events: &mpsc::UnboundedSender<ScrapeEvent>,
) -> Result<PokemonScrape, ScrapeError> {
    let url = details_url(&options.base_url, &entry.name, entry.generation);
    let html = source.fetch_page(&url).await?;

    // The parsed document stays inside this block so it is gone before the
    // media downloads are awaited.
    let (extraction, shiny_lock, artwork_src) = {
        let document = Html::parse_document(&html);
        let extraction = extract(&document, &entry.name);
        let shiny_lock = detect_shiny_lock(&page_text(&document), &entry.name);
        let artwork_src = media::select_artwork(&document, &entry.name);
        (extraction, shiny_lock, artwork_src)
    };

    let mut sprite_path = None;
    let mut image_path = None;
    let mut media_downloaded = Vec::new();

    if options.download_media {
        let _ = events.send(ScrapeEvent::PokemonDownloading {
            index,
            name: entry.name.clone(),
            kind: MediaKind::Sprite,
        });
        match media::download_sprite(source, &options.base_url, &options.assets_dir, entry).await {
            Ok(path) => {
                sprite_path = Some(path);
                media_downloaded.push(MediaKind::Sprite.to_string());
            }
            Err(e) => log::warn!("{}: failed to download sprite: {}", entry.name, e),
        }

        if let Some(src) = artwork_src {
            let _ = events.send(ScrapeEvent::PokemonDownloading {
                index,
                name: entry.name.clone(),
                kind: MediaKind::Artwork,
            });
            match media::download_artwork(
                source,
                &options.base_url,
                &options.assets_dir,
                entry,
                &src,
            )
            .await
            {
                Ok(path) => {
                    image_path = Some(path);
                    media_downloaded.push(MediaKind::Artwork.to_string());
                }
                Err(e) => log::warn!("{}: failed to download artwork: {}", entry.name, e),
            }
        } else {
            log::debug!("{}: no artwork on page", entry.name);
        }
    }

    Ok(PokemonScrape {
        pokemon: ScrapedPokemon {
            entry: entry.clone(),
            details: extraction.details,
            shiny_lock,
            sprite_path,
            image_path,
        },
        report: extraction.report,
        url,
        media_downloaded,
    })
}

/// Internal result from processing a single Pokémon.
enum PokemonResult {
    Scraped {
        scraped: ScrapedPokemon,
        log_entry: LogEntry,
    },
    Failed {
        log_entry: LogEntry,
    },
}

async fn process_single_pokemon<S: PageSource>(
    source: &S,
    entry: &PokemonEntry,
    options: &ScrapeOptions,
    index: usize,
    events: &mpsc::UnboundedSender<ScrapeEvent>,
) -> PokemonResult {
    let name = entry.name.clone();
    let _ = events.send(ScrapeEvent::PokemonStarted {
        index,
        name: name.clone(),
    });

    match scrape_pokemon(source, entry, options, index, events).await {
        Ok(result) => {
            let details = &result.pokemon.details;
            let log_entry = if details.is_empty() {
                let _ = events.send(ScrapeEvent::PokemonNoData {
                    index,
                    name: name.clone(),
                });
                LogEntry::NoData {
                    pokemon: name,
                    generation: entry.generation,
                    url: result.url,
                }
            } else {
                let _ = events.send(ScrapeEvent::PokemonCompleted {
                    index,
                    name: name.clone(),
                    methods: details.method_count(),
                    shiny_lock: result.pokemon.shiny_lock,
                });
                LogEntry::Success {
                    pokemon: name,
                    generation: entry.generation,
                    general_methods: details.general_methods.len(),
                    specific_methods: details.specific_methods.len(),
                    shiny_lock: result.pokemon.shiny_lock,
                    media_downloaded: result.media_downloaded,
                    rows_rejected: result.report.rows_rejected(),
                }
            };
            PokemonResult::Scraped {
                scraped: result.pokemon,
                log_entry,
            }
        }
        Err(e) => {
            let _ = events.send(ScrapeEvent::PokemonFailed {
                index,
                name: name.clone(),
                reason: e.to_string(),
            });
            PokemonResult::Failed {
                log_entry: LogEntry::Error {
                    pokemon: name,
                    message: e.to_string(),
                },
            }
        }
    }
}

/// Scrape a list of portal entries concurrently.
///
/// Results come back in input order regardless of completion order.
pub async fn scrape_entries<S: PageSource>(
    source: &S,
    entries: &[PokemonEntry],
    options: &ScrapeOptions,
    events: &mpsc::UnboundedSender<ScrapeEvent>,
) -> ScrapeResult {
    let workers = options.workers.max(1);

    let mut results: Vec<(usize, PokemonResult)> = stream::iter(entries.iter().enumerate())
        .map(|(index, entry)| {
            let events = events.clone();
            async move {
                let result = process_single_pokemon(source, entry, options, index, &events).await;
                (index, result)
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;
    results.sort_by_key(|(index, _)| *index);

    let mut pokemon = Vec::new();
    let mut log = ScrapeLog::new();
    for (_, result) in results {
        match result {
            PokemonResult::Scraped { scraped, log_entry } => {
                pokemon.push(scraped);
                log.add(log_entry);
            }
            PokemonResult::Failed { log_entry } => log.add(log_entry),
        }
    }

    ScrapeResult { pokemon, log }
}

/// Scrape every Pokémon listed on one generation's portal.
///
/// Failing to load the portal is an error; failures on single Pokémon pages
/// are recorded in the log.
pub async fn scrape_generation<S: PageSource>(
    source: &S,
    generation: Generation,
    options: &ScrapeOptions,
    events: mpsc::UnboundedSender<ScrapeEvent>,
) -> Result<ScrapeResult, ScrapeError> {
    let _ = events.send(ScrapeEvent::FetchingPortal { generation });
    let mut entries = fetch_portal(source, &options.base_url, generation).await?;
    if let Some(max) = options.limit {
        entries.truncate(max);
    }
    let _ = events.send(ScrapeEvent::PortalLoaded {
        generation,
        total: entries.len(),
    });
    log::info!("{}G portal: {} Pokémon", generation, entries.len());

    let result = scrape_entries(source, &entries, options, &events).await;

    let _ = events.send(ScrapeEvent::Done);
    Ok(result)
}
