//! Upserts and link operations for hunt data.
//!
//! Every entity is keyed by its natural key (Pokémon name + generation, game
//! name, method name, location name + region), so storing the same scrape
//! twice leaves the database unchanged.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, params};
use shasse_catalog::{GameEntry, ScrapedPokemon, SpecificMethodRecord};
use shasse_core::{Generation, MethodCategory, detect_generation_from_game};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },
}

/// Separator used to store a record's sprite names in one column.
pub(crate) const SPRITE_SEPARATOR: &str = ", ";

// ── Pokémon ─────────────────────────────────────────────────────────────────

/// Insert or update a Pokémon row. Returns its id.
///
/// A missing number or media path never erases one stored by an earlier scrape.
pub fn upsert_pokemon(conn: &Connection, pokemon: &ScrapedPokemon) -> Result<i64, OperationError> {
    let entry = &pokemon.entry;
    let id = conn.query_row(
        "INSERT INTO pokemon (name, number, generation, shiny_lock, sprite_path, image_path)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(name, generation) DO UPDATE SET
             number = COALESCE(excluded.number, pokemon.number),
             shiny_lock = excluded.shiny_lock,
             sprite_path = COALESCE(excluded.sprite_path, pokemon.sprite_path),
             image_path = COALESCE(excluded.image_path, pokemon.image_path),
             updated_at = datetime('now')
         RETURNING id",
        params![
            entry.name,
            entry.number,
            entry.generation.number(),
            pokemon.shiny_lock.as_str(),
            path_str(pokemon.sprite_path.as_deref()),
            path_str(pokemon.image_path.as_deref()),
        ],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Find a Pokémon's id by exact name and generation.
pub fn find_pokemon_id(
    conn: &Connection,
    name: &str,
    generation: Generation,
) -> Result<Option<i64>, OperationError> {
    let result = conn.query_row(
        "SELECT id FROM pokemon WHERE name = ?1 AND generation = ?2",
        params![name, generation.number()],
        |row| row.get(0),
    );
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete a Pokémon and all of its links.
pub fn delete_pokemon(conn: &Connection, pokemon_id: i64) -> Result<(), OperationError> {
    let deleted = conn.execute("DELETE FROM pokemon WHERE id = ?1", params![pokemon_id])?;
    if deleted == 0 {
        return Err(OperationError::NotFound {
            entity_type: "pokemon".to_string(),
            id: pokemon_id.to_string(),
        });
    }
    Ok(())
}

// ── Games, methods, locations ───────────────────────────────────────────────

/// Insert or update a game. Returns its id.
pub fn upsert_game(conn: &Connection, game: &GameEntry) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO games (name, generation) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET
             generation = COALESCE(excluded.generation, games.generation)
         RETURNING id",
        params![game.name, game.generation.map(Generation::number)],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Insert or update a hunting method. Returns its id.
pub fn upsert_hunt_method(
    conn: &Connection,
    name: &str,
    category: MethodCategory,
    description: &str,
    is_general: bool,
) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO hunt_methods (name, description, is_general, category)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO UPDATE SET
             description = excluded.description,
             is_general = excluded.is_general,
             category = excluded.category
         RETURNING id",
        params![name, description, is_general, category.as_str()],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Insert a location if it is new. Returns its id.
pub fn upsert_location(conn: &Connection, name: &str, region: &str) -> Result<i64, OperationError> {
    let id = conn.query_row(
        "INSERT INTO locations (name, region) VALUES (?1, ?2)
         ON CONFLICT(name, region) DO UPDATE SET name = excluded.name
         RETURNING id",
        params![name, region],
        |row| row.get(0),
    )?;
    Ok(id)
}

// ── Links ───────────────────────────────────────────────────────────────────

/// Link a Pokémon to a general method.
pub fn link_general_method(
    conn: &Connection,
    pokemon_id: i64,
    hunt_method_id: i64,
    conditions: Option<&str>,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO pokemon_general_methods (pokemon_id, hunt_method_id, conditions)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(pokemon_id, hunt_method_id) DO UPDATE SET
             conditions = excluded.conditions",
        params![pokemon_id, hunt_method_id, conditions],
    )?;
    Ok(())
}

/// Link a Pokémon to a method in one game at one location.
pub fn link_specific_method(
    conn: &Connection,
    pokemon_id: i64,
    hunt_method_id: i64,
    game_id: i64,
    location_id: i64,
    record: &SpecificMethodRecord,
) -> Result<(), OperationError> {
    let sprites = (!record.sprites.is_empty()).then(|| record.sprites.join(SPRITE_SEPARATOR));
    conn.execute(
        "INSERT INTO pokemon_specific_methods
             (pokemon_id, hunt_method_id, game_id, location_id, probability, conditions, level, sprites)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(pokemon_id, hunt_method_id, game_id, location_id) DO UPDATE SET
             probability = excluded.probability,
             conditions = excluded.conditions,
             level = excluded.level,
             sprites = excluded.sprites",
        params![
            pokemon_id,
            hunt_method_id,
            game_id,
            location_id,
            record.probability,
            record.conditions,
            record.level,
            sprites,
        ],
    )?;
    Ok(())
}

/// Record that a Pokémon appears in a game.
pub fn link_pokemon_game(
    conn: &Connection,
    pokemon_id: i64,
    game_id: i64,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT OR IGNORE INTO pokemon_games (pokemon_id, game_id) VALUES (?1, ?2)",
        params![pokemon_id, game_id],
    )?;
    Ok(())
}

/// Remove every method and game link of a Pokémon, keeping the row itself.
pub fn clear_pokemon_links(conn: &Connection, pokemon_id: i64) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM pokemon_general_methods WHERE pokemon_id = ?1",
        params![pokemon_id],
    )?;
    conn.execute(
        "DELETE FROM pokemon_specific_methods WHERE pokemon_id = ?1",
        params![pokemon_id],
    )?;
    conn.execute(
        "DELETE FROM pokemon_games WHERE pokemon_id = ?1",
        params![pokemon_id],
    )?;
    Ok(())
}

// ── Whole scrape results ────────────────────────────────────────────────────

/// Counts from storing one scraped Pokémon.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveStats {
    pub games: usize,
    pub general_methods: usize,
    pub specific_methods: usize,
}

impl SaveStats {
    pub fn add(&mut self, other: &SaveStats) {
        self.games += other.games;
        self.general_methods += other.general_methods;
        self.specific_methods += other.specific_methods;
    }
}

/// Store one scraped Pokémon and all of its methods in a single transaction.
///
/// The Pokémon's links are replaced wholesale, so rows that disappeared from
/// the page since the last scrape are dropped too.
pub fn save_scraped_pokemon(
    conn: &Connection,
    pokemon: &ScrapedPokemon,
) -> Result<SaveStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = SaveStats::default();

    let pokemon_id = upsert_pokemon(&tx, pokemon)?;
    clear_pokemon_links(&tx, pokemon_id)?;

    let details = &pokemon.details;
    let mut game_ids: HashMap<&str, i64> = HashMap::new();
    for game in &details.games {
        let game_id = upsert_game(&tx, game)?;
        link_pokemon_game(&tx, pokemon_id, game_id)?;
        game_ids.insert(game.name.as_str(), game_id);
        stats.games += 1;
    }

    for method in &details.general_methods {
        let method_id =
            upsert_hunt_method(&tx, &method.name, method.category, &method.description, true)?;
        link_general_method(&tx, pokemon_id, method_id, method.conditions.as_deref())?;
        stats.general_methods += 1;
    }

    for record in &details.specific_methods {
        let game_id = match game_ids.get(record.game.as_str()) {
            Some(&id) => id,
            None => {
                let game = GameEntry {
                    name: record.game.clone(),
                    generation: detect_generation_from_game(&record.game),
                };
                let id = upsert_game(&tx, &game)?;
                link_pokemon_game(&tx, pokemon_id, id)?;
                game_ids.insert(record.game.as_str(), id);
                stats.games += 1;
                id
            }
        };
        let method_id = upsert_hunt_method(
            &tx,
            &record.method,
            record.category,
            &record.description,
            false,
        )?;
        let location_id = upsert_location(&tx, &record.location, &record.game)?;
        link_specific_method(&tx, pokemon_id, method_id, game_id, location_id, record)?;
        stats.specific_methods += 1;
    }

    tx.commit()?;
    log::debug!(
        "Stored {} ({}G): {} general, {} specific, {} games",
        pokemon.entry.name,
        pokemon.entry.generation,
        stats.general_methods,
        stats.specific_methods,
        stats.games
    );
    Ok(stats)
}

fn path_str(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}
