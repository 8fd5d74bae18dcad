//! Data model types for scraped shiny-hunting data.
//!
//! These are plain serializable records: the page extractor produces them,
//! the store persists them, and the CLI prints them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shasse_core::{Generation, MethodCategory};

// ── Methods ─────────────────────────────────────────────────────────────────

/// A hunting method tied to one game and one location.
///
/// Two records describe the same fact when their [`dedup_key`](Self::dedup_key)
/// is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificMethodRecord {
    pub method: String,
    /// Canonical game name.
    pub game: String,
    pub location: String,
    /// Encounter rate as shown on the page, optionally followed by
    /// `" | TC = X%"` when a capture rate was given.
    #[serde(default)]
    pub probability: String,
    pub category: MethodCategory,
    #[serde(default)]
    pub description: String,
    /// Level parsed from a `niv. N` marker in the method text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    /// Names of the Pokémon sprites shown next to the location.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sprites: Vec<String>,
}

impl SpecificMethodRecord {
    /// Case- and whitespace-insensitive identity: (game, method, location).
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            shasse_core::text::fold_key(&self.game),
            shasse_core::text::fold_key(&self.method),
            shasse_core::text::fold_key(&self.location),
        )
    }
}

/// A hunting method that applies regardless of game, from the summary box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralMethodRecord {
    pub name: String,
    pub category: MethodCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
}

// ── Games ───────────────────────────────────────────────────────────────────

/// A game seen in a Pokémon's method tables.
///
/// `generation` is `None` when the name is not a recognized game, rather than
/// silently guessing 1G.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub name: String,
    pub generation: Option<Generation>,
}

// ── Pokémon ─────────────────────────────────────────────────────────────────

/// Everything extracted from one Pokémon's hunting page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetails {
    pub general_methods: Vec<GeneralMethodRecord>,
    pub specific_methods: Vec<SpecificMethodRecord>,
    pub games: Vec<GameEntry>,
}

impl PokemonDetails {
    pub fn is_empty(&self) -> bool {
        self.general_methods.is_empty() && self.specific_methods.is_empty()
    }

    pub fn method_count(&self) -> usize {
        self.general_methods.len() + self.specific_methods.len()
    }
}

/// Whether a Pokémon can be obtained shiny.
///
/// Detection is a text heuristic, so "no evidence either way" is kept
/// distinct from a confirmed answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShinyLock {
    Locked,
    Unlocked,
    #[default]
    Unknown,
}

impl ShinyLock {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a stored value, treating anything unrecognized as unknown.
    pub fn from_str_loose(s: &str) -> Self {
        match s {
            "locked" => Self::Locked,
            "unlocked" => Self::Unlocked,
            _ => Self::Unknown,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }
}

impl std::fmt::Display for ShinyLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Pokémon link found on a generation portal page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEntry {
    pub name: String,
    /// National Pokédex number, when the portal exposes one.
    pub number: Option<u32>,
    pub generation: Generation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_url: Option<String>,
}

impl PokemonEntry {
    pub fn new(name: impl Into<String>, generation: Generation) -> Self {
        Self {
            name: name.into(),
            number: None,
            generation,
            sprite_url: None,
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    /// Zero-padded Pokédex number, or `"XXX"` when unknown.
    pub fn padded_number(&self) -> String {
        match self.number {
            Some(n) => format!("{:03}", n),
            None => "XXX".to_string(),
        }
    }
}

/// The full result of scraping one Pokémon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPokemon {
    pub entry: PokemonEntry,
    pub details: PokemonDetails,
    pub shiny_lock: ShinyLock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
}
