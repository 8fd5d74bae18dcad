//! Row normalization.
//!
//! Method tables merge cells with `rowspan`, so a row may carry anywhere from
//! one to four cells. Missing leading cells mean "same game / same method as
//! the row above". The normalizer turns each row into a canonical
//! [`NormalizedRow`], threading an explicit [`RowContext`] from row to row.

use std::sync::LazyLock;

use regex::Regex;
use shasse_catalog::SpecificMethodRecord;
use shasse_core::methods::METHOD_START_KEYWORDS;
use shasse_core::text::{collapse_separators, normalize_ws, truncate_chars};
use shasse_core::{
    classify_specific_method, clean_game_name, clean_method_name, is_placeholder_location,
};

use crate::cell::RawCell;
use crate::classify::{CellKind, classify_cell, is_probability};

/// Probability strings longer than this are cut down to their first rate.
pub const MAX_PROBABILITY_CHARS: usize = 100;

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?\s*%").expect("static pattern"));
static RATIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\s*/\s*\d+").expect("static pattern"));
static TC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:tc|taux\s+de\s+capture)\s*[=:]\s*(\d+(?:[.,]\d+)?\s*%)")
        .expect("static pattern")
});
static TC_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:tc|taux\s+de\s+capture)\s*[=:].*$").expect("static pattern")
});
static PERCENT_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?\s*%.*$").expect("static pattern"));
static LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)niv\.\s*(\d+)").expect("static pattern"));
static SANDWICH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Sandwich\s+(\w+)\s+N\.\s*(\d+)").expect("static pattern"));

/// A table row mapped onto the method columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRow {
    pub game: String,
    pub method: String,
    pub location: String,
    pub probability: String,
    pub sprites: Vec<String>,
}

/// Carry-forward state for one table: the last game and method seen.
///
/// Scoped to a single table. A fresh context is used for every table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowContext {
    pub current_game: Option<String>,
    pub current_method: Option<String>,
}

impl RowContext {
    /// Context for the row after `row`.
    pub fn advance(self, row: &NormalizedRow) -> RowContext {
        RowContext {
            current_game: non_empty(&row.game).or(self.current_game),
            current_method: non_empty(&row.method).or(self.current_method),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Fields read from a row before inheritance.
#[derive(Default)]
struct OwnFields {
    game: String,
    method: String,
    location: String,
    probability: String,
    sprites: Vec<String>,
}

impl OwnFields {
    fn from_location_cell(cell: &RawCell) -> Self {
        Self {
            location: clean_location(&cell.text),
            sprites: cell.image_alts(),
            ..Self::default()
        }
    }
}

/// Normalize one row against the current table context.
///
/// Returns `None` when the row has no game, method or location of its own.
pub fn normalize(cells: &[RawCell], ctx: &RowContext) -> Option<NormalizedRow> {
    let own = match cells {
        [game, method, location, probability] => OwnFields {
            game: clean_game(&game.text),
            method: clean_method(&method.text),
            probability: clean_probability_cell(probability),
            ..OwnFields::from_location_cell(location)
        },
        [first, second, third] => three_cells(first, second, third),
        [first, second] => two_cells(first, second),
        [only] => one_cell(only)?,
        _ => return None,
    };

    if own.game.is_empty() && own.method.is_empty() && own.location.is_empty() {
        return None;
    }

    let game = if own.game.is_empty() {
        ctx.current_game.clone().unwrap_or_default()
    } else {
        own.game
    };
    let method = if own.method.is_empty() {
        ctx.current_method.clone().unwrap_or_default()
    } else {
        own.method
    };

    Some(NormalizedRow {
        game,
        method,
        location: own.location,
        probability: own.probability,
        sprites: own.sprites,
    })
}

/// Fold step: normalize a row and return the context for the next one.
/// A dropped row leaves the context untouched.
pub fn normalize_row(ctx: RowContext, cells: &[RawCell]) -> (RowContext, Option<NormalizedRow>) {
    match normalize(cells, &ctx) {
        Some(row) => (ctx.advance(&row), Some(row)),
        None => (ctx, None),
    }
}

fn three_cells(first: &RawCell, second: &RawCell, third: &RawCell) -> OwnFields {
    if let Some((game, method)) = split_composite(&first.text) {
        return OwnFields {
            game: clean_game(&game),
            method: clean_method(&method),
            probability: clean_probability_cell(third),
            ..OwnFields::from_location_cell(second)
        };
    }

    match classify_cell(first) {
        CellKind::Game => OwnFields {
            game: clean_game(&first.text),
            method: clean_method(&second.text),
            ..OwnFields::from_location_cell(third)
        },
        // Continuation row: the game cell is merged from above.
        _ => OwnFields {
            method: clean_method(&first.text),
            probability: clean_probability_cell(third),
            ..OwnFields::from_location_cell(second)
        },
    }
}

fn two_cells(first: &RawCell, second: &RawCell) -> OwnFields {
    if is_probability(&second.text) {
        return OwnFields {
            probability: clean_probability_cell(second),
            ..OwnFields::from_location_cell(first)
        };
    }

    let (game, method) = split_composite(&first.text).unwrap_or_default();
    if !method.is_empty() {
        return OwnFields {
            game: clean_game(&game),
            method: clean_method(&method),
            ..OwnFields::from_location_cell(second)
        };
    }

    OwnFields {
        method: clean_method(&first.text),
        ..OwnFields::from_location_cell(second)
    }
}

/// A lone cell only counts when it pairs a rate with a real location.
fn one_cell(cell: &RawCell) -> Option<OwnFields> {
    if !PERCENT_RE.is_match(&cell.text) {
        return None;
    }
    let location = clean_location(&cell.text);
    if location.is_empty() || is_placeholder_location(&location) {
        return None;
    }
    Some(OwnFields {
        location,
        probability: clean_probability_cell(cell),
        sprites: cell.image_alts(),
        ..OwnFields::default()
    })
}

/// Split glued "GameMethod" text at the earliest method keyword.
///
/// The keyword must follow a letter or digit directly: "Super Canne Pêche"
/// is a method on its own, "RougeRencontre" is a game and a method.
pub fn split_composite(text: &str) -> Option<(String, String)> {
    let position = METHOD_START_KEYWORDS
        .iter()
        .flat_map(|keyword| text.match_indices(keyword).map(|(i, _)| i))
        .filter(|&i| glued_at(text, i))
        .min()?;
    let (game, method) = text.split_at(position);
    let game = game.trim();
    if game.is_empty() {
        return None;
    }
    Some((game.to_string(), method.trim().to_string()))
}

fn glued_at(text: &str, position: usize) -> bool {
    text[..position]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric)
}

// -- Field cleanup --

fn clean_game(text: &str) -> String {
    clean_game_name(&collapse_separators(text))
}

fn clean_method(text: &str) -> String {
    clean_method_name(&collapse_separators(text))
}

/// Drop rate and capture-rate fragments that leaked into a location cell.
pub fn clean_location(text: &str) -> String {
    let text = normalize_ws(text);
    let without_tc = TC_TAIL_RE.replace(&text, "");
    let without_rate = PERCENT_TAIL_RE.replace(&without_tc, "");
    collapse_separators(&without_rate)
}

fn compact_rate(rate: &str) -> String {
    rate.split_whitespace().collect()
}

fn clean_probability_cell(cell: &RawCell) -> String {
    clean_probability(&cell.text, &cell.tooltips())
}

/// Canonical probability text: the visible rate, plus `" | TC = X%"` when a
/// capture rate is given either inline or in a tooltip.
pub fn clean_probability(text: &str, tooltips: &[String]) -> String {
    let text = normalize_ws(text);

    let tc = TC_RE
        .captures(&text)
        .map(|caps| compact_rate(&caps[1]))
        .or_else(|| tooltips.iter().find_map(|tip| tooltip_capture_rate(tip)));

    let visible = normalize_ws(&TC_TAIL_RE.replace(&text, ""));
    let main = if let Some(m) = PERCENT_RE.find(&visible) {
        compact_rate(m.as_str())
    } else if let Some(m) = RATIO_RE.find(&visible) {
        compact_rate(m.as_str())
    } else if visible.chars().count() > MAX_PROBABILITY_CHARS {
        truncate_chars(&visible, MAX_PROBABILITY_CHARS).trim().to_string()
    } else {
        collapse_separators(&visible)
    };

    match tc {
        Some(tc) if tc == main => main,
        Some(tc) if main.is_empty() => format!("TC = {}", tc),
        Some(tc) => format!("{} | TC = {}", main, tc),
        None => main,
    }
}

fn tooltip_capture_rate(tip: &str) -> Option<String> {
    if let Some(caps) = TC_RE.captures(tip) {
        return Some(compact_rate(&caps[1]));
    }
    let tip = tip.trim();
    PERCENT_RE
        .find(tip)
        .filter(|m| m.start() == 0 && m.end() == tip.len())
        .map(|m| compact_rate(m.as_str()))
}

// -- Method details --

/// Level and special condition carried inside a method cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDetails {
    pub level: Option<u32>,
    pub conditions: Option<String>,
}

/// Read `niv. N` and known conditions out of method text.
pub fn parse_method_details(method: &str) -> MethodDetails {
    let level = LEVEL_RE
        .captures(method)
        .and_then(|caps| caps[1].parse().ok());

    let conditions = if method.contains("Aura Porte-Bonheur") {
        Some("Aura Porte-Bonheur".to_string())
    } else if method.contains("Sandwich") {
        SANDWICH_RE
            .captures(method)
            .map(|caps| format!("Sandwich {} Niveau {}", &caps[1], &caps[2]))
    } else if method.contains("Repousse") {
        Some("Avec Repousse".to_string())
    } else {
        None
    };

    MethodDetails { level, conditions }
}

impl NormalizedRow {
    /// Build the method record for this row, classifying its method.
    pub fn into_record(self) -> SpecificMethodRecord {
        let info = classify_specific_method(&self.method);
        let details = parse_method_details(&self.method);
        SpecificMethodRecord {
            method: self.method,
            game: self.game,
            location: self.location,
            probability: self.probability,
            category: info.category,
            description: info.description.to_string(),
            level: details.level,
            conditions: details.conditions,
            sprites: self.sprites,
        }
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
