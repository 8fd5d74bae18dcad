use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::{AppContext, CliError};

pub(crate) fn run_stats(ctx: &AppContext, top: usize) -> Result<(), CliError> {
    let Some(conn) = super::open_existing_database(ctx)? else {
        return Ok(());
    };

    let stats = shasse_db::catalog_stats(&conn, top)
        .map_err(|e| CliError::database(format!("Failed to query database stats: {}", e)))?;

    log::info!(
        "{}",
        "Hunt Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", ctx.database.display());
    crate::log_blank();
    log::info!("  Pokémon:          {:>8}", stats.pokemon);
    log::info!("  Shiny locked:     {:>8}", stats.shiny_locked);
    log::info!("  Games:            {:>8}", stats.games);
    log::info!("  Hunt methods:     {:>8}", stats.hunt_methods);
    log::info!("  Locations:        {:>8}", stats.locations);
    log::info!("  General links:    {:>8}", stats.general_links);
    log::info!("  Specific links:   {:>8}", stats.specific_links);

    if !stats.per_generation.is_empty() {
        crate::log_blank();
        log::info!("  {}", "Per generation".if_supports_color(Stdout, |t| t.cyan()));
        for (generation, count) in &stats.per_generation {
            log::info!("    {:>2}G  {:>6}", generation.number(), count);
        }
    }

    if !stats.top_methods.is_empty() {
        crate::log_blank();
        log::info!("  {}", "Most used methods".if_supports_color(Stdout, |t| t.cyan()));
        for (name, uses) in &stats.top_methods {
            log::info!("    {:>6}  {}", uses, name);
        }
    }

    Ok(())
}
