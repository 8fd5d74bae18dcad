//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Create all tables and indexes if they don't exist.
///
/// Safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a hunt database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let mut version = from_version;
    while version < CURRENT_VERSION {
        match version {
            // v2 keeps the level and sprites parsed out of method rows.
            1 => {
                conn.execute_batch(
                    "ALTER TABLE pokemon_specific_methods ADD COLUMN level INTEGER;
                     ALTER TABLE pokemon_specific_methods ADD COLUMN sprites TEXT;",
                )?;
            }
            _ => {}
        }
        version += 1;
        log::info!("Migrated hunt database to schema version {}", version);
        set_schema_version(conn, version)?;
    }

    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- One row per Pokémon page per generation portal
CREATE TABLE IF NOT EXISTS pokemon (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    number INTEGER,
    generation INTEGER NOT NULL,
    shiny_lock TEXT NOT NULL DEFAULT 'unknown',
    sprite_path TEXT,
    image_path TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(name, generation)
);
CREATE INDEX IF NOT EXISTS idx_pokemon_generation ON pokemon(generation);

-- Games; generation is NULL when the name is not a known game
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    generation INTEGER
);

-- Hunting methods, general (summary box) or specific (per-game tables)
CREATE TABLE IF NOT EXISTS hunt_methods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    is_general BOOLEAN NOT NULL DEFAULT 0,
    category TEXT NOT NULL
);

-- Locations, scoped by the game they appear in
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    region TEXT NOT NULL DEFAULT '',
    UNIQUE(name, region)
);

CREATE TABLE IF NOT EXISTS pokemon_general_methods (
    pokemon_id INTEGER NOT NULL REFERENCES pokemon(id) ON DELETE CASCADE,
    hunt_method_id INTEGER NOT NULL REFERENCES hunt_methods(id),
    conditions TEXT,
    PRIMARY KEY (pokemon_id, hunt_method_id)
);

CREATE TABLE IF NOT EXISTS pokemon_specific_methods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pokemon_id INTEGER NOT NULL REFERENCES pokemon(id) ON DELETE CASCADE,
    hunt_method_id INTEGER NOT NULL REFERENCES hunt_methods(id),
    game_id INTEGER NOT NULL REFERENCES games(id),
    location_id INTEGER NOT NULL REFERENCES locations(id),
    probability TEXT NOT NULL DEFAULT '',
    conditions TEXT,
    level INTEGER,
    sprites TEXT,
    UNIQUE(pokemon_id, hunt_method_id, game_id, location_id)
);
CREATE INDEX IF NOT EXISTS idx_specific_pokemon ON pokemon_specific_methods(pokemon_id);

CREATE TABLE IF NOT EXISTS pokemon_games (
    pokemon_id INTEGER NOT NULL REFERENCES pokemon(id) ON DELETE CASCADE,
    game_id INTEGER NOT NULL REFERENCES games(id),
    PRIMARY KEY (pokemon_id, game_id)
);
"#;
