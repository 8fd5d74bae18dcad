//! Static canonicalization tables for the shasse pipeline.
//!
//! Everything here is read-only data and pure functions: game names and their
//! abbreviations, game → generation detection, method keyword categories, and
//! location keywords. These tables are shared by the scraper's classifier,
//! normalizer and validator, and are safe to use from any number of threads.

pub mod game;
pub mod generation;
pub mod methods;
pub mod places;
pub mod text;

pub use game::{
    Game, GameParseError, clean_game_name, contains_known_game, detect_generation_from_game,
};
pub use generation::{Generation, GenerationError};
pub use methods::{
    CategoryParseError, MethodCategory, MethodInfo, classify_general_method,
    classify_specific_method, clean_method_name,
};
pub use places::{has_place_keyword, is_placeholder_location};
