//! Read queries for the hunt database.
//!
//! Provides lookup by name, listing per generation, method and game joins,
//! statistics, and reloading full scrape results for export.

use std::path::PathBuf;
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{Connection, params};
use shasse_catalog::{
    GameEntry, GeneralMethodRecord, PokemonDetails, PokemonEntry, ScrapedPokemon, ShinyLock,
    SpecificMethodRecord,
};
use shasse_core::text::{fold_accents, fold_key};
use shasse_core::{Generation, MethodCategory};

use crate::operations::{OperationError, SPRITE_SEPARATOR};

/// A stored Pokémon row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonRow {
    pub id: i64,
    pub name: String,
    pub number: Option<u32>,
    pub generation: Generation,
    pub shiny_lock: ShinyLock,
    pub sprite_path: Option<String>,
    pub image_path: Option<String>,
    pub updated_at: String,
}

impl PokemonRow {
    pub fn entry(&self) -> PokemonEntry {
        PokemonEntry {
            name: self.name.clone(),
            number: self.number,
            generation: self.generation,
            sprite_url: None,
        }
    }
}

/// General and specific methods stored for one Pokémon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonMethods {
    pub general: Vec<GeneralMethodRecord>,
    pub specific: Vec<SpecificMethodRecord>,
}

const POKEMON_COLUMNS: &str =
    "id, name, number, generation, shiny_lock, sprite_path, image_path, updated_at";

// ── Pokémon Lookups ─────────────────────────────────────────────────────────

/// List stored Pokémon, optionally for one generation, in Pokédex order.
pub fn list_pokemon(
    conn: &Connection,
    generation: Option<Generation>,
) -> Result<Vec<PokemonRow>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {POKEMON_COLUMNS} FROM pokemon
         WHERE ?1 IS NULL OR generation = ?1
         ORDER BY generation, number IS NULL, number, name"
    ))?;
    let rows = stmt.query_map(params![generation.map(Generation::number)], row_to_pokemon)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find Pokémon by name, ignoring case and French accents.
///
/// A name can be stored once per generation, so several rows may come back.
pub fn find_pokemon(
    conn: &Connection,
    name: &str,
    generation: Option<Generation>,
) -> Result<Vec<PokemonRow>, OperationError> {
    let wanted = fold_accents(&fold_key(name));
    Ok(list_pokemon(conn, generation)?
        .into_iter()
        .filter(|row| fold_accents(&fold_key(&row.name)) == wanted)
        .collect())
}

/// Search Pokémon by name (case-insensitive LIKE).
pub fn search_pokemon(conn: &Connection, query: &str) -> Result<Vec<PokemonRow>, OperationError> {
    let pattern = format!("%{}%", query.trim());
    let mut stmt = conn.prepare(&format!(
        "SELECT {POKEMON_COLUMNS} FROM pokemon
         WHERE name LIKE ?1
         ORDER BY generation, number IS NULL, number, name LIMIT 100"
    ))?;
    let rows = stmt.query_map(params![pattern], row_to_pokemon)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Methods and Games ───────────────────────────────────────────────────────

/// All methods linked to a Pokémon, general first.
pub fn methods_for_pokemon(
    conn: &Connection,
    pokemon_id: i64,
) -> Result<PokemonMethods, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT hm.name, hm.category, hm.description, pgm.conditions
         FROM pokemon_general_methods pgm
         JOIN hunt_methods hm ON pgm.hunt_method_id = hm.id
         WHERE pgm.pokemon_id = ?1
         ORDER BY pgm.rowid",
    )?;
    let general = stmt
        .query_map(params![pokemon_id], |row| {
            Ok(GeneralMethodRecord {
                name: row.get(0)?,
                category: category_column(row, 1)?,
                description: row.get(2)?,
                conditions: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT hm.name, g.name, l.name, psm.probability, hm.category, hm.description,
                psm.level, psm.conditions, psm.sprites
         FROM pokemon_specific_methods psm
         JOIN hunt_methods hm ON psm.hunt_method_id = hm.id
         JOIN games g ON psm.game_id = g.id
         JOIN locations l ON psm.location_id = l.id
         WHERE psm.pokemon_id = ?1
         ORDER BY psm.id",
    )?;
    let specific = stmt
        .query_map(params![pokemon_id], |row| {
            let sprites: Option<String> = row.get(8)?;
            Ok(SpecificMethodRecord {
                method: row.get(0)?,
                game: row.get(1)?,
                location: row.get(2)?,
                probability: row.get(3)?,
                category: category_column(row, 4)?,
                description: row.get(5)?,
                level: row.get(6)?,
                conditions: row.get(7)?,
                sprites: sprites
                    .map(|s| {
                        s.split(SPRITE_SEPARATOR)
                            .filter(|name| !name.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PokemonMethods { general, specific })
}

/// Games a Pokémon appears in, oldest generation first.
pub fn games_for_pokemon(
    conn: &Connection,
    pokemon_id: i64,
) -> Result<Vec<GameEntry>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT g.name, g.generation
         FROM pokemon_games pg
         JOIN games g ON pg.game_id = g.id
         WHERE pg.pokemon_id = ?1
         ORDER BY g.generation IS NULL, g.generation, g.name",
    )?;
    let rows = stmt.query_map(params![pokemon_id], |row| {
        let generation: Option<u8> = row.get(1)?;
        Ok(GameEntry {
            name: row.get(0)?,
            generation: generation.and_then(Generation::new),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Rebuild full scrape results from the database, for JSON export.
pub fn load_scraped_pokemon(
    conn: &Connection,
    generation: Option<Generation>,
) -> Result<Vec<ScrapedPokemon>, OperationError> {
    list_pokemon(conn, generation)?
        .into_iter()
        .map(|row| {
            let methods = methods_for_pokemon(conn, row.id)?;
            let games = games_for_pokemon(conn, row.id)?;
            Ok(ScrapedPokemon {
                entry: row.entry(),
                details: PokemonDetails {
                    general_methods: methods.general,
                    specific_methods: methods.specific,
                    games,
                },
                shiny_lock: row.shiny_lock,
                sprite_path: row.sprite_path.map(PathBuf::from),
                image_path: row.image_path.map(PathBuf::from),
            })
        })
        .collect()
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary statistics for the hunt database.
#[derive(Debug, Default)]
pub struct CatalogStats {
    pub pokemon: i64,
    pub games: i64,
    pub hunt_methods: i64,
    pub locations: i64,
    pub general_links: i64,
    pub specific_links: i64,
    pub shiny_locked: i64,
    /// Pokémon stored per generation, ascending.
    pub per_generation: Vec<(Generation, i64)>,
    /// Most used methods with the number of Pokémon using each.
    pub top_methods: Vec<(String, i64)>,
}

/// Get overall statistics, with the `top` most used methods.
pub fn catalog_stats(conn: &Connection, top: usize) -> Result<CatalogStats, OperationError> {
    let count = |sql: &str| -> Result<i64, rusqlite::Error> { conn.query_row(sql, [], |r| r.get(0)) };

    let mut stmt =
        conn.prepare("SELECT generation, COUNT(*) FROM pokemon GROUP BY generation ORDER BY generation")?;
    let per_generation = stmt
        .query_map([], |row| Ok((generation_column(row, 0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT hm.name, COUNT(DISTINCT links.pokemon_id) AS uses
         FROM (
             SELECT pokemon_id, hunt_method_id FROM pokemon_general_methods
             UNION ALL
             SELECT pokemon_id, hunt_method_id FROM pokemon_specific_methods
         ) AS links
         JOIN hunt_methods hm ON links.hunt_method_id = hm.id
         GROUP BY hm.id
         ORDER BY uses DESC, hm.name
         LIMIT ?1",
    )?;
    let top_methods = stmt
        .query_map(params![top as i64], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CatalogStats {
        pokemon: count("SELECT COUNT(*) FROM pokemon")?,
        games: count("SELECT COUNT(*) FROM games")?,
        hunt_methods: count("SELECT COUNT(*) FROM hunt_methods")?,
        locations: count("SELECT COUNT(*) FROM locations")?,
        general_links: count("SELECT COUNT(*) FROM pokemon_general_methods")?,
        specific_links: count("SELECT COUNT(*) FROM pokemon_specific_methods")?,
        shiny_locked: count("SELECT COUNT(*) FROM pokemon WHERE shiny_lock = 'locked'")?,
        per_generation,
        top_methods,
    })
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_pokemon(row: &rusqlite::Row<'_>) -> rusqlite::Result<PokemonRow> {
    let shiny_lock: String = row.get(4)?;
    Ok(PokemonRow {
        id: row.get(0)?,
        name: row.get(1)?,
        number: row.get(2)?,
        generation: generation_column(row, 3)?,
        shiny_lock: ShinyLock::from_str_loose(&shiny_lock),
        sprite_path: row.get(5)?,
        image_path: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn generation_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Generation> {
    let value: u8 = row.get(idx)?;
    Generation::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn category_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<MethodCategory> {
    let value: String = row.get(idx)?;
    MethodCategory::from_str(&value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
