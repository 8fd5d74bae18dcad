use serde::{Deserialize, Serialize};

/// A main-series Pokémon generation, always in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Generation(u8);

impl Generation {
    pub const FIRST: Generation = Generation(1);
    pub const LATEST: Generation = Generation(9);

    /// Build a generation from its number, or `None` when outside `1..=9`.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= 9 {
            Some(Self(number))
        } else {
            None
        }
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// All generations in ascending order.
    pub fn all() -> impl Iterator<Item = Generation> {
        (Self::FIRST.0..=Self::LATEST.0).map(Generation)
    }

    /// Path segment used by the wiki (`"3g"`).
    pub fn slug(self) -> String {
        format!("{}g", self.0)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a number or string is not a valid generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid generation '{0}' (expected 1-9)")]
pub struct GenerationError(pub String);

impl TryFrom<u8> for Generation {
    type Error = GenerationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Generation::new(value).ok_or_else(|| GenerationError(value.to_string()))
    }
}

impl From<Generation> for u8 {
    fn from(value: Generation) -> Self {
        value.0
    }
}

impl std::str::FromStr for Generation {
    type Err = GenerationError;

    /// Accepts `"3"`, `"3g"` and `"gen3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let digits = trimmed
            .strip_prefix("gen")
            .or_else(|| trimmed.strip_suffix('g'))
            .unwrap_or(&trimmed)
            .trim();
        digits
            .parse::<u8>()
            .ok()
            .and_then(Generation::new)
            .ok_or_else(|| GenerationError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_enforced() {
        assert!(Generation::new(0).is_none());
        assert!(Generation::new(10).is_none());
        assert_eq!(Generation::new(9).map(Generation::number), Some(9));
        assert_eq!(Generation::all().count(), 9);
    }

    #[test]
    fn parses_wiki_and_cli_forms() {
        assert_eq!("3".parse::<Generation>().unwrap().number(), 3);
        assert_eq!("3g".parse::<Generation>().unwrap().number(), 3);
        assert_eq!("Gen7".parse::<Generation>().unwrap().number(), 7);
        assert!("12g".parse::<Generation>().is_err());
        assert!("abc".parse::<Generation>().is_err());
    }

    #[test]
    fn slug_matches_wiki_path() {
        assert_eq!(Generation::new(4).unwrap().slug(), "4g");
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let ok: Generation = serde_json::from_str("5").unwrap();
        assert_eq!(ok.number(), 5);
        assert!(serde_json::from_str::<Generation>("0").is_err());
    }
}
