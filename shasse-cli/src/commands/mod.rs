pub(crate) mod config;
pub(crate) mod extract;
pub(crate) mod scrape;
pub(crate) mod show;
pub(crate) mod stats;
pub(crate) mod transfer;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shasse_catalog::{PokemonDetails, PokemonEntry, ShinyLock};
use shasse_db::Connection;

use crate::{AppContext, CliError};

/// Open the configured database, or warn and return `None` when it has not
/// been created yet.
pub(crate) fn open_existing_database(ctx: &AppContext) -> Result<Option<Connection>, CliError> {
    if !ctx.database.exists() {
        log::warn!("No database found at {}", ctx.database.display());
        log::info!("Run 'shasse scrape generation <N>' or 'shasse import <file>' to create one.");
        return Ok(None);
    }
    shasse_db::open_database(&ctx.database)
        .map(Some)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))
}

/// Open the configured database, creating it if needed.
pub(crate) fn open_or_create_database(ctx: &AppContext) -> Result<Connection, CliError> {
    if let Some(parent) = ctx.database.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    shasse_db::open_database(&ctx.database)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))
}

pub(crate) fn shiny_lock_label(lock: ShinyLock) -> String {
    match lock {
        ShinyLock::Locked => format!(
            "{}",
            "shiny locked".if_supports_color(Stdout, |t| t.red())
        ),
        ShinyLock::Unlocked => format!(
            "{}",
            "shiny available".if_supports_color(Stdout, |t| t.green())
        ),
        ShinyLock::Unknown => format!(
            "{}",
            "shiny status unknown".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }
}

/// Print one Pokémon's methods, grouped by game.
pub(crate) fn print_details(entry: &PokemonEntry, lock: ShinyLock, details: &PokemonDetails) {
    log::info!(
        "{} {} {}",
        format!("#{}", entry.padded_number()).if_supports_color(Stdout, |t| t.dimmed()),
        entry.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({}G, {})", entry.generation, shiny_lock_label(lock)),
    );

    if details.is_empty() {
        log::info!(
            "  {}",
            "No hunting method found".if_supports_color(Stdout, |t| t.dimmed())
        );
        return;
    }

    if !details.general_methods.is_empty() {
        log::info!("  {}", "General methods".if_supports_color(Stdout, |t| t.cyan()));
        for method in &details.general_methods {
            match &method.conditions {
                Some(conditions) => log::info!(
                    "    - {} [{}] {}",
                    method.name,
                    method.category,
                    format!("({})", conditions).if_supports_color(Stdout, |t| t.dimmed()),
                ),
                None => log::info!("    - {} [{}]", method.name, method.category),
            }
        }
    }

    let mut games: Vec<&str> = Vec::new();
    for record in &details.specific_methods {
        if !games.contains(&record.game.as_str()) {
            games.push(&record.game);
        }
    }
    for game in games {
        let generation = details
            .games
            .iter()
            .find(|g| g.name == game)
            .and_then(|g| g.generation)
            .map(|g| format!(" ({}G)", g))
            .unwrap_or_default();
        log::info!(
            "  {}{}",
            game.if_supports_color(Stdout, |t| t.cyan()),
            generation
        );
        for record in details.specific_methods.iter().filter(|r| r.game == game) {
            let mut line = format!("    - {} @ {}", record.method, record.location);
            if !record.probability.is_empty() {
                line.push_str(&format!(" [{}]", record.probability));
            }
            if let Some(conditions) = &record.conditions {
                line.push_str(&format!(" ({})", conditions));
            }
            log::info!("{}", line);
        }
    }
}
