//! Method validator.
//!
//! A record is kept only with a game, a method of at least two characters and
//! a real location. Rates leaking into the method or location cell, placeholder
//! locations and locations without any place keyword are rejected, each with
//! its own [`Rejection`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use shasse_catalog::SpecificMethodRecord;
use shasse_core::{has_place_keyword, is_placeholder_location};

static LEAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:%|tc\s*=)").expect("static pattern"));
static BARE_RATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+(?:[.,]\d+)?\s*%\s*$").expect("static pattern"));

/// Why a candidate method record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    MissingGame,
    MissingMethod,
    MethodTooShort,
    /// The method cell actually held a rate.
    MethodIsRate,
    MissingLocation,
    PlaceholderLocation,
    LocationIsRate,
    /// Usually a sprite cell mistaken for a location.
    NoPlaceKeyword,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingGame => "missing game",
            Self::MissingMethod => "missing method",
            Self::MethodTooShort => "method too short",
            Self::MethodIsRate => "method is a rate",
            Self::MissingLocation => "missing location",
            Self::PlaceholderLocation => "placeholder location",
            Self::LocationIsRate => "location is a rate",
            Self::NoPlaceKeyword => "location has no place keyword",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check a record, returning the first failed rule.
pub fn check(record: &SpecificMethodRecord) -> Result<(), Rejection> {
    let game = record.game.trim();
    let method = record.method.trim();
    let location = record.location.trim();

    if game.is_empty() {
        return Err(Rejection::MissingGame);
    }
    if method.is_empty() {
        return Err(Rejection::MissingMethod);
    }
    if method.chars().count() < 2 {
        return Err(Rejection::MethodTooShort);
    }
    if LEAK_RE.is_match(method) || BARE_RATE_RE.is_match(method) {
        return Err(Rejection::MethodIsRate);
    }
    if location.is_empty() {
        return Err(Rejection::MissingLocation);
    }
    if is_placeholder_location(location) {
        return Err(Rejection::PlaceholderLocation);
    }
    if LEAK_RE.is_match(location) {
        return Err(Rejection::LocationIsRate);
    }
    if !has_place_keyword(location) {
        return Err(Rejection::NoPlaceKeyword);
    }
    Ok(())
}

pub fn is_valid(record: &SpecificMethodRecord) -> bool {
    check(record).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shasse_core::MethodCategory;

    fn record(game: &str, method: &str, location: &str) -> SpecificMethodRecord {
        SpecificMethodRecord {
            method: method.to_string(),
            game: game.to_string(),
            location: location.to_string(),
            probability: String::new(),
            category: MethodCategory::Encounter,
            description: String::new(),
            level: None,
            conditions: None,
            sprites: vec![],
        }
    }

    #[test]
    fn accepts_complete_record() {
        assert!(is_valid(&record("Écarlate", "Rencontre", "Zone Côtière")));
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(check(&record("", "Rencontre", "Route 1")), Err(Rejection::MissingGame));
        assert_eq!(check(&record("Rouge", " ", "Route 1")), Err(Rejection::MissingMethod));
        assert_eq!(check(&record("Rouge", "R", "Route 1")), Err(Rejection::MethodTooShort));
        assert_eq!(check(&record("Rouge", "Reset", "")), Err(Rejection::MissingLocation));
    }

    #[test]
    fn rejects_classification_leaks() {
        assert_eq!(check(&record("Rouge", "% chance", "Route 1")), Err(Rejection::MethodIsRate));
        assert_eq!(check(&record("Rouge", "TC = 5%", "Route 1")), Err(Rejection::MethodIsRate));
        assert_eq!(check(&record("Rouge", "30%", "Route 1")), Err(Rejection::MethodIsRate));
        assert_eq!(
            check(&record("Rouge", "Reset", "tc=5% Route")),
            Err(Rejection::LocationIsRate)
        );
    }

    #[test]
    fn rejects_placeholders_and_sprite_names() {
        assert_eq!(
            check(&record("Rouge", "Reset", "Non spécifié")),
            Err(Rejection::PlaceholderLocation)
        );
        assert_eq!(check(&record("Rouge", "Reset", "???")), Err(Rejection::PlaceholderLocation));
        assert_eq!(
            check(&record("Rouge", "Reset", "Pikachu Raichu")),
            Err(Rejection::NoPlaceKeyword)
        );
    }

    #[test]
    fn valid_records_always_have_a_real_location() {
        let candidates = [
            record("Or", "Reset", "Tour Cendrée"),
            record("Or", "Reset", "autre"),
            record("Or", "Reset", "Pikachu"),
            record("Or", "Surf", "Route 40"),
            record("Or", "Surf", "n/a"),
        ];
        for candidate in candidates.iter().filter(|r| is_valid(r)) {
            assert!(!candidate.location.is_empty());
            assert!(!is_placeholder_location(&candidate.location));
            assert!(has_place_keyword(&candidate.location));
        }
    }
}
