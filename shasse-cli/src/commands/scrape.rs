use std::path::{Path, PathBuf};

use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shasse_catalog::ScrapedPokemon;
use shasse_core::Generation;
use shasse_db::{Connection, SaveStats};
use shasse_scraper::{
    LogEntry, PokebipClient, ScrapeEvent, ScrapeLog, ScrapeOptions, find_in_portal,
    scrape_generation, scrape_pokemon,
};

use crate::cli_types::{ScrapeArgs, ScrapeTarget};
use crate::events::run_with_events;
use crate::spinner::ScrapeProgress;
use crate::{AppContext, CliError};

/// Run the scrape command.
pub(crate) fn run_scrape(ctx: &AppContext, target: ScrapeTarget) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    match target {
        ScrapeTarget::Generation { generation, args } => {
            rt.block_on(scrape_generations(ctx, &[generation], &args))
        }
        ScrapeTarget::All { args } => {
            let all: Vec<Generation> = Generation::all().collect();
            rt.block_on(scrape_generations(ctx, &all, &args))
        }
        ScrapeTarget::Pokemon {
            name,
            generation,
            args,
        } => rt.block_on(scrape_one(ctx, &name, generation, &args)),
    }
}

fn scrape_options(ctx: &AppContext, args: &ScrapeArgs) -> ScrapeOptions {
    let mut options = ScrapeOptions::from_config(&ctx.config);
    if let Some(workers) = args.workers {
        options.workers = workers.max(1);
    }
    options.download_media = !args.no_media && !args.dry_run;
    options.limit = args.limit;
    options
}

fn log_settings(ctx: &AppContext, args: &ScrapeArgs, options: &ScrapeOptions) {
    log::info!(
        "Scraping from: {}",
        options.base_url.if_supports_color(Stdout, |t| t.cyan()),
    );
    if args.dry_run {
        log::info!(
            "{}",
            "Dry run: nothing will be downloaded or stored".if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        log::info!(
            "Database: {}",
            ctx.database.display().if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if options.download_media {
        log::info!(
            "Media:    {}",
            options.assets_dir.display().if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if let Some(n) = options.limit {
        log::info!(
            "{}",
            format!("Limit: {} Pokémon per generation", n).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();
}

fn open_target_database(ctx: &AppContext, args: &ScrapeArgs) -> Result<Option<Connection>, CliError> {
    if args.dry_run {
        Ok(None)
    } else {
        super::open_or_create_database(ctx).map(Some)
    }
}

async fn scrape_generations(
    ctx: &AppContext,
    generations: &[Generation],
    args: &ScrapeArgs,
) -> Result<(), CliError> {
    let options = scrape_options(ctx, args);
    let client = PokebipClient::new(&ctx.config)
        .map_err(|e| CliError::scrape(format!("Failed to create HTTP client: {}", e)))?;
    let conn = open_target_database(ctx, args)?;
    log_settings(ctx, args, &options);

    let mut exported: Vec<ScrapedPokemon> = Vec::new();
    let mut totals = SaveStats::default();
    let mut total_pokemon = 0usize;
    let mut total_locked = 0usize;
    let mut total_no_data = 0usize;
    let mut total_errors = 0usize;

    for &generation in generations {
        log::info!(
            "{}",
            format!("Generation {}", generation).if_supports_color(Stdout, |t| t.bold()),
        );

        let mut progress = ScrapeProgress::new(options.workers, ctx.quiet);
        let mut started = 0usize;
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<ScrapeEvent>();

        let scrape_result = run_with_events(
            scrape_generation(&client, generation, &options, event_tx),
            event_rx,
            |e| match e {
                ScrapeEvent::FetchingPortal { generation } => {
                    progress.set_message(format!("Loading {}G portal...", generation));
                }
                ScrapeEvent::PortalLoaded { total, .. } => {
                    progress.set_total(total);
                    progress.set_message("");
                }
                ScrapeEvent::PokemonStarted { index, name } => {
                    progress.claim(index, name);
                    started += 1;
                }
                ScrapeEvent::PokemonDownloading { index, name, kind } => {
                    progress.update(index, format!("Downloading {} for {}", kind, name));
                }
                ScrapeEvent::PokemonCompleted { index, .. }
                | ScrapeEvent::PokemonNoData { index, .. }
                | ScrapeEvent::PokemonFailed { index, .. } => progress.finish(index),
                ScrapeEvent::Done => {}
            },
        )
        .await;

        progress.clear();
        log::debug!("{}G: {} Pokémon started", generation, started);

        let result = match scrape_result {
            Ok(result) => result,
            Err(e) => {
                log::warn!(
                    "  {} Could not load the {}G portal: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    generation,
                    e,
                );
                total_errors += 1;
                crate::log_blank();
                continue;
            }
        };

        let summary = result.log.summary();
        total_pokemon += result.pokemon.len();
        total_locked += summary.shiny_locked;
        total_no_data += summary.total_no_data;
        total_errors += summary.total_errors;

        let has_issues = summary.total_no_data > 0 || summary.total_errors > 0;
        // In quiet mode, re-emit the generation header as warn for context
        if has_issues && log::max_level() < LevelFilter::Info {
            log::warn!("Generation {}:", generation);
        }

        if summary.total_success > 0 {
            log::info!(
                "  {} {} Pokémon scraped ({} general, {} specific methods)",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                summary.total_success,
                summary.general_methods,
                summary.specific_methods,
            );
        }
        if summary.shiny_locked > 0 {
            log::info!(
                "  {} {} shiny locked",
                "\u{1F512}".if_supports_color(Stdout, |t| t.yellow()),
                summary.shiny_locked,
            );
        }
        if summary.media_downloaded > 0 {
            log::info!(
                "  {} {} media files downloaded",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                summary.media_downloaded,
            );
        }
        if summary.rows_rejected > 0 {
            log::info!(
                "  {}",
                format!("{} table rows rejected", summary.rows_rejected)
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        report_problems(&result.log);

        if let Some(conn) = &conn {
            let stored = store_all(conn, &result.pokemon);
            log::info!(
                "  {} {} Pokémon stored",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                stored.0,
            );
            totals.add(&stored.1);
        }

        if !args.no_log && !args.dry_run {
            write_scrape_log(ctx, generation, &result.log);
        }

        if args.export.is_some() {
            exported.extend(result.pokemon);
        }
        crate::log_blank();
    }

    if let Some(path) = &args.export {
        export_to(path, &exported)?;
    }

    if generations.len() > 1 {
        log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
        log::info!(
            "  {} {} Pokémon, {} shiny locked",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            total_pokemon,
            total_locked,
        );
        if conn.is_some() {
            log::info!(
                "  {} {} general and {} specific methods stored",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                totals.general_methods,
                totals.specific_methods,
            );
        }
        if total_no_data > 0 {
            log::warn!(
                "  {} {} without data",
                "?".if_supports_color(Stdout, |t| t.yellow()),
                total_no_data,
            );
        }
        if total_errors > 0 {
            log::warn!(
                "  {} {} errors",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                total_errors,
            );
        }
    }

    Ok(())
}

async fn scrape_one(
    ctx: &AppContext,
    name: &str,
    generation: Generation,
    args: &ScrapeArgs,
) -> Result<(), CliError> {
    let options = scrape_options(ctx, args);
    let client = PokebipClient::new(&ctx.config)
        .map_err(|e| CliError::scrape(format!("Failed to create HTTP client: {}", e)))?;
    let conn = open_target_database(ctx, args)?;

    let entry = find_in_portal(&client, &options.base_url, name, generation)
        .await
        .map_err(|e| CliError::scrape(e.to_string()))?;

    let mut progress = ScrapeProgress::new(1, ctx.quiet);
    progress.set_total(1);
    progress.claim(0, format!("Scraping {}", entry.name));

    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<ScrapeEvent>();
    let result = run_with_events(
        async move { scrape_pokemon(&client, &entry, &options, 0, &event_tx).await },
        event_rx,
        |e| {
            if let ScrapeEvent::PokemonDownloading { index, name, kind } = e {
                progress.update(index, format!("Downloading {} for {}", kind, name));
            }
        },
    )
    .await;
    progress.clear();

    let scraped = result.map_err(|e| CliError::scrape(e.to_string()))?;
    let pokemon = &scraped.pokemon;
    super::print_details(&pokemon.entry, pokemon.shiny_lock, &pokemon.details);
    crate::log_blank();

    if scraped.report.rows_rejected() > 0 {
        log::info!(
            "{}",
            format!("{} table rows rejected", scraped.report.rows_rejected())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if let Some(conn) = &conn {
        shasse_db::save_scraped_pokemon(conn, pokemon)
            .map_err(|e| CliError::database(format!("Failed to store {}: {}", pokemon.entry.name, e)))?;
        log::info!(
            "{} Stored in {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            ctx.database.display(),
        );
    }
    if let Some(path) = &args.export {
        export_to(path, std::slice::from_ref(pokemon))?;
    }
    Ok(())
}

/// Store every scraped Pokémon, logging (not failing on) individual errors.
/// Returns how many were stored and the summed link counts.
fn store_all(conn: &Connection, pokemon: &[ScrapedPokemon]) -> (usize, SaveStats) {
    let mut stored = 0;
    let mut totals = SaveStats::default();
    for p in pokemon {
        match shasse_db::save_scraped_pokemon(conn, p) {
            Ok(stats) => {
                stored += 1;
                totals.add(&stats);
            }
            Err(e) => log::warn!(
                "  {} Failed to store {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                p.entry.name,
                e,
            ),
        }
    }
    (stored, totals)
}

fn report_problems(log: &ScrapeLog) {
    for entry in log.entries() {
        match entry {
            LogEntry::NoData { pokemon, url, .. } => {
                log::warn!(
                    "  {} {}: no hunting method found",
                    "?".if_supports_color(Stdout, |t| t.yellow()),
                    pokemon,
                );
                log::debug!("      Page: {}", url);
            }
            LogEntry::Error { pokemon, message } => {
                log::warn!(
                    "  {} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    pokemon,
                    message,
                );
            }
            LogEntry::Success { .. } => {}
        }
    }
}

/// Scrape logs go in a `logs/` directory next to the database.
fn log_dir(database: &Path) -> PathBuf {
    match database.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join("logs"),
        _ => PathBuf::from("logs"),
    }
}

fn write_scrape_log(ctx: &AppContext, generation: Generation, log: &ScrapeLog) {
    let dir = log_dir(&ctx.database);
    let path = dir.join(format!(
        "scrape-log-{}-{}.txt",
        generation.slug(),
        chrono::Local::now().format("%Y%m%d-%H%M%S"),
    ));
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("Warning: could not create log dir: {}", e);
    } else if let Err(e) = log.write_to_file(&path) {
        log::warn!("Warning: could not write scrape log: {}", e);
    } else {
        log::debug!("Scrape log written to {}", path.display());
    }
}

fn export_to(path: &Path, pokemon: &[ScrapedPokemon]) -> Result<(), CliError> {
    shasse_catalog::save_export(path, pokemon).map_err(|e| CliError::export(e.to_string()))?;
    log::info!(
        "{} {} Pokémon exported to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        pokemon.len(),
        path.display(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_sit_next_to_the_database() {
        assert_eq!(log_dir(Path::new("pokemon_shasse.db")), PathBuf::from("logs"));
        assert_eq!(
            log_dir(Path::new("data/hunt/pokemon_shasse.db")),
            PathBuf::from("data/hunt/logs")
        );
    }
}
