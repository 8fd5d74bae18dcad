//! Cell classification.
//!
//! Table cells never say what they hold, so the role of a cell is inferred
//! from its content shape. The rules form an ordered list and the first rule
//! that matches wins; cheap specific signals (a percentage, a game name) come
//! before broad ones (keyword soup, text length).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use shasse_core::contains_known_game;
use shasse_core::methods::contains_method_keyword;
use shasse_core::places::has_place_keyword;

use crate::cell::RawCell;

/// Texts longer than this are descriptive prose rather than a short label.
pub const LONG_TEXT_THRESHOLD: usize = 25;

static PROBABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:[.,]\d+)?\s*%|\d+\s*/\s*\d+|\btc\s*=").expect("static pattern")
});

/// The role a table cell plays in a method row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Game,
    Method,
    Location,
    Probability,
    Unknown,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Method => "method",
            Self::Location => "location",
            Self::Probability => "probability",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification rule: when `matches(text, markup)` holds, the cell is
/// tagged `kind`.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub kind: CellKind,
    matches: fn(&str, &str) -> bool,
}

impl Rule {
    pub fn matches(&self, text: &str, markup: &str) -> bool {
        (self.matches)(text, markup)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Whether `text` looks like a rate: `30%`, `1/4096`, or a `TC =` marker.
pub fn is_probability(text: &str) -> bool {
    PROBABILITY_RE.is_match(text)
}

fn probability_rule(text: &str, _markup: &str) -> bool {
    is_probability(text)
}

fn long_text_rule(text: &str, _markup: &str) -> bool {
    text.chars().count() > LONG_TEXT_THRESHOLD && !contains_known_game(text)
}

fn game_rule(text: &str, _markup: &str) -> bool {
    contains_known_game(text)
}

fn method_rule(text: &str, _markup: &str) -> bool {
    contains_method_keyword(text)
}

fn location_rule(text: &str, markup: &str) -> bool {
    markup.contains("<img") || has_place_keyword(text)
}

/// Classification rules in precedence order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "probability",
        kind: CellKind::Probability,
        matches: probability_rule,
    },
    Rule {
        name: "long-text",
        kind: CellKind::Location,
        matches: long_text_rule,
    },
    Rule {
        name: "known-game",
        kind: CellKind::Game,
        matches: game_rule,
    },
    Rule {
        name: "method-keyword",
        kind: CellKind::Method,
        matches: method_rule,
    },
    Rule {
        name: "image-or-place",
        kind: CellKind::Location,
        matches: location_rule,
    },
];

/// The first rule matching the cell, if any.
pub fn matching_rule(text: &str, markup: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(text, markup))
}

/// Classify a cell from its text and markup. Pure: no cross-row state.
pub fn classify(text: &str, markup: &str) -> CellKind {
    matching_rule(text, markup).map_or(CellKind::Unknown, |rule| rule.kind)
}

pub fn classify_cell(cell: &RawCell) -> CellKind {
    classify(&cell.text, &cell.markup)
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
