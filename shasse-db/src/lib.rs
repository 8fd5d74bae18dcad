//! SQLite persistence layer for scraped shiny-hunting data.
//!
//! Provides schema creation, natural-key upserts, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, SaveStats, clear_pokemon_links, delete_pokemon, find_pokemon_id,
    link_general_method, link_pokemon_game, link_specific_method, save_scraped_pokemon,
    upsert_game, upsert_hunt_method, upsert_location, upsert_pokemon,
};
pub use queries::{
    CatalogStats, PokemonMethods, PokemonRow, catalog_stats, find_pokemon, games_for_pokemon,
    list_pokemon, load_scraped_pokemon, methods_for_pokemon, search_pokemon,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};
