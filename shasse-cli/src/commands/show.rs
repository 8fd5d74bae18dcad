use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shasse_catalog::PokemonDetails;
use shasse_core::Generation;

use crate::{AppContext, CliError};

/// Show what the database holds for a Pokémon, one block per generation page.
pub(crate) fn run_show(
    ctx: &AppContext,
    name: &str,
    generation: Option<Generation>,
) -> Result<(), CliError> {
    let Some(conn) = super::open_existing_database(ctx)? else {
        return Ok(());
    };

    let rows = shasse_db::find_pokemon(&conn, name, generation)
        .map_err(|e| CliError::database(format!("Failed to look up {}: {}", name, e)))?;
    if rows.is_empty() {
        return Err(CliError::not_found(match generation {
            Some(g) => format!("No stored page for '{}' in generation {}", name, g),
            None => format!("No stored page for '{}'", name),
        }));
    }

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            crate::log_blank();
        }
        let methods = shasse_db::methods_for_pokemon(&conn, row.id)
            .map_err(|e| CliError::database(format!("Failed to query methods: {}", e)))?;
        let games = shasse_db::games_for_pokemon(&conn, row.id)
            .map_err(|e| CliError::database(format!("Failed to query games: {}", e)))?;
        let details = PokemonDetails {
            general_methods: methods.general,
            specific_methods: methods.specific,
            games,
        };
        super::print_details(&row.entry(), row.shiny_lock, &details);
        log::debug!("  Last updated: {}", row.updated_at);
    }
    Ok(())
}

/// List stored Pokémon, optionally filtered.
pub(crate) fn run_list(
    ctx: &AppContext,
    generation: Option<Generation>,
    search: Option<&str>,
) -> Result<(), CliError> {
    let Some(conn) = super::open_existing_database(ctx)? else {
        return Ok(());
    };

    let mut rows = match search {
        Some(query) => shasse_db::search_pokemon(&conn, query),
        None => shasse_db::list_pokemon(&conn, generation),
    }
    .map_err(|e| CliError::database(format!("Failed to list Pokémon: {}", e)))?;
    if let Some(g) = generation {
        rows.retain(|row| row.generation == g);
    }

    if rows.is_empty() {
        log::info!("No Pokémon stored yet.");
        return Ok(());
    }

    for row in &rows {
        let lock = if row.shiny_lock.is_locked() {
            format!(" {}", "locked".if_supports_color(Stdout, |t| t.red()))
        } else {
            String::new()
        };
        log::info!(
            "  {} {:<4} {}{}",
            format!("#{}", row.entry().padded_number()).if_supports_color(Stdout, |t| t.dimmed()),
            format!("{}G", row.generation),
            row.name,
            lock,
        );
    }
    crate::log_blank();
    log::info!("{} Pokémon", rows.len());
    Ok(())
}
