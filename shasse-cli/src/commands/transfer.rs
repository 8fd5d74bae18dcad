//! JSON export and import of stored Pokémon.

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shasse_core::Generation;
use shasse_db::SaveStats;

use crate::{AppContext, CliError};

pub(crate) fn run_export(
    ctx: &AppContext,
    output: &Path,
    generation: Option<Generation>,
) -> Result<(), CliError> {
    let Some(conn) = super::open_existing_database(ctx)? else {
        return Ok(());
    };

    let pokemon = shasse_db::load_scraped_pokemon(&conn, generation)
        .map_err(|e| CliError::database(format!("Failed to load Pokémon: {}", e)))?;
    shasse_catalog::save_export(output, &pokemon).map_err(|e| CliError::export(e.to_string()))?;

    log::info!(
        "{} {} Pokémon exported to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        pokemon.len(),
        output.display(),
    );
    Ok(())
}

pub(crate) fn run_import(ctx: &AppContext, file: &Path) -> Result<(), CliError> {
    let export = shasse_catalog::load_export(file).map_err(|e| CliError::export(e.to_string()))?;
    let conn = super::open_or_create_database(ctx)?;

    log::info!(
        "Importing {} Pokémon exported at {}",
        export.pokemon.len(),
        export.exported_at.if_supports_color(Stdout, |t| t.dimmed()),
    );

    let mut totals = SaveStats::default();
    let mut failed = 0usize;
    for pokemon in &export.pokemon {
        match shasse_db::save_scraped_pokemon(&conn, pokemon) {
            Ok(stats) => totals.add(&stats),
            Err(e) => {
                failed += 1;
                log::warn!(
                    "  {} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    pokemon.entry.name,
                    e,
                );
            }
        }
    }

    log::info!(
        "  {} {} Pokémon stored ({} general, {} specific methods)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        export.pokemon.len() - failed,
        totals.general_methods,
        totals.specific_methods,
    );
    if failed > 0 {
        return Err(CliError::database(format!("{} Pokémon could not be stored", failed)));
    }
    Ok(())
}
