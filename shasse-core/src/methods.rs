//! Shiny-hunting method keyword tables.
//!
//! Two families of methods appear on a page: general methods listed in the
//! summary box (Masuda, Charme Chroma, ...) that apply regardless of game, and
//! specific methods in the per-game tables (Rencontre, Reset, Surf, ...).
//! Both are classified by keyword lookup against the ordered tables below.

use serde::{Deserialize, Serialize};

use crate::text::contains_word;

/// Broad category of a hunting method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodCategory {
    General,
    Encounter,
    Reset,
    Breeding,
}

impl MethodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Encounter => "encounter",
            Self::Reset => "reset",
            Self::Breeding => "breeding",
        }
    }

    pub fn all() -> &'static [MethodCategory] {
        &[Self::General, Self::Encounter, Self::Reset, Self::Breeding]
    }
}

impl std::fmt::Display for MethodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known method category.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown method category: '{0}'")]
pub struct CategoryParseError(pub String);

impl std::str::FromStr for MethodCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Category and human description attached to a classified method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    pub category: MethodCategory,
    pub description: &'static str,
}

impl MethodInfo {
    const fn new(category: MethodCategory, description: &'static str) -> Self {
        Self {
            category,
            description,
        }
    }
}

// -- Specific methods --

/// Keyword -> category for per-game table methods. Plain substring match.
const SPECIFIC_KEYWORDS: &[(&str, MethodCategory)] = &[
    ("reset", MethodCategory::Reset),
    ("rencontre", MethodCategory::Encounter),
    ("pêche", MethodCategory::Encounter),
    ("surf", MethodCategory::Encounter),
    ("scanner", MethodCategory::Encounter),
    ("sandwich", MethodCategory::Encounter),
    ("apparition", MethodCategory::Encounter),
    ("massive", MethodCategory::Encounter),
];

fn specific_description(category: MethodCategory) -> &'static str {
    match category {
        MethodCategory::Reset => "Méthode reset",
        MethodCategory::Encounter => "Méthode de rencontre",
        MethodCategory::Breeding => "Méthode de reproduction",
        MethodCategory::General => "Méthode générale",
    }
}

/// Classify a per-game table method. Unmatched names default to encounter.
pub fn classify_specific_method(name: &str) -> MethodInfo {
    let lower = name.to_lowercase();
    let category = SPECIFIC_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(MethodCategory::Encounter);
    MethodInfo::new(category, specific_description(category))
}

/// Short table spellings expanded to their full method name.
const METHOD_ABBREVIATIONS: &[(&str, &str)] = &[
    ("App. M.", "Apparition Massive"),
    ("Massive", "Apparition Massive"),
];

/// Expand an abbreviated method cell; other text is returned trimmed.
pub fn clean_method_name(raw: &str) -> String {
    let trimmed = raw.trim();
    METHOD_ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == trimmed)
        .map(|(_, full)| (*full).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

// -- General methods --

/// Keyword table for summary-box methods, most specific first
/// ("charme chroma" before "charme", "poké radar" before "radar").
const GENERAL_METHODS: &[(&str, MethodInfo)] = &[
    (
        "app. m. ev",
        MethodInfo::new(MethodCategory::Encounter, "Apparition Massive sur Écarlate/Violet"),
    ),
    (
        "calc",
        MethodInfo::new(MethodCategory::Encounter, "Combo Capture (Let's Go)"),
    ),
    (
        "charme chroma",
        MethodInfo::new(MethodCategory::General, "Augmente les chances de shiny"),
    ),
    (
        "charme",
        MethodInfo::new(MethodCategory::General, "Augmente les chances de shiny"),
    ),
    (
        "masuda",
        MethodInfo::new(
            MethodCategory::Breeding,
            "Reproduction avec parents de nationalités différentes",
        ),
    ),
    (
        "poké radar",
        MethodInfo::new(MethodCategory::Encounter, "Radar à Pokemon"),
    ),
    (
        "radar",
        MethodInfo::new(MethodCategory::Encounter, "Radar à Pokemon"),
    ),
    (
        "s.o.s",
        MethodInfo::new(MethodCategory::Encounter, "Appel à l'aide"),
    ),
    (
        "sos",
        MethodInfo::new(MethodCategory::Encounter, "Appel à l'aide"),
    ),
    (
        "navidex",
        MethodInfo::new(MethodCategory::General, "Navigation Dex"),
    ),
    (
        "hordes",
        MethodInfo::new(MethodCategory::Encounter, "Rencontres de Hordes"),
    ),
    (
        "safari des amis",
        MethodInfo::new(MethodCategory::Encounter, "Safari des Amis"),
    ),
    (
        "aura brillance",
        MethodInfo::new(MethodCategory::General, "Aura Brillance (Sandwich)"),
    ),
    (
        "sandwich",
        MethodInfo::new(MethodCategory::General, "Sandwich (Écarlate/Violet)"),
    ),
];

const DEFAULT_GENERAL: MethodInfo =
    MethodInfo::new(MethodCategory::General, "Méthode générale");

/// Classify a summary-box method. Unmatched names default to general.
pub fn classify_general_method(name: &str) -> MethodInfo {
    GENERAL_METHODS
        .iter()
        .find(|(keyword, _)| contains_word(name, keyword))
        .map(|(_, info)| *info)
        .unwrap_or(DEFAULT_GENERAL)
}

/// A general method detected by scanning the whole page text, used when the
/// summary box is missing.
#[derive(Debug, Clone, Copy)]
pub struct FallbackMethod {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// The known general methods and the phrases that reveal them in page text.
pub const FALLBACK_GENERAL_METHODS: &[FallbackMethod] = &[
    FallbackMethod {
        name: "App. M. EV",
        keywords: &["app. m. ev", "app m ev", "apparition massive"],
    },
    FallbackMethod {
        name: "CALC",
        keywords: &["calc"],
    },
    FallbackMethod {
        name: "Charme Chroma",
        keywords: &["charme chroma"],
    },
    FallbackMethod {
        name: "Masuda",
        keywords: &["masuda"],
    },
    FallbackMethod {
        name: "Poké Radar",
        keywords: &["poké radar", "radar"],
    },
    FallbackMethod {
        name: "S.O.S",
        keywords: &["s.o.s", "sos"],
    },
    FallbackMethod {
        name: "Navidex",
        keywords: &["navidex"],
    },
    FallbackMethod {
        name: "Hordes",
        keywords: &["hordes"],
    },
    FallbackMethod {
        name: "Safari des Amis",
        keywords: &["safari des amis"],
    },
    FallbackMethod {
        name: "Aura Brillance",
        keywords: &["aura brillance"],
    },
    FallbackMethod {
        name: "Sandwich",
        keywords: &["sandwich"],
    },
];

/// Names of the fallback methods whose keywords occur in `page_text`, in
/// table order.
pub fn scan_general_methods(page_text: &str) -> Vec<&'static str> {
    FALLBACK_GENERAL_METHODS
        .iter()
        .filter(|m| m.keywords.iter().any(|k| contains_word(page_text, k)))
        .map(|m| m.name)
        .collect()
}

// -- Cell and record keywords --

/// Words that mark a table cell as a method.
pub const METHOD_KEYWORDS: &[&str] = &[
    "rencontre",
    "reset",
    "surf",
    "pêche",
    "sandwich",
    "repousse",
    "scanner",
    "apparition",
];

/// Whether `text` contains a method keyword (case-insensitive substring, so
/// glued cells like "RougeRencontre" still count).
pub fn contains_method_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    METHOD_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Case-sensitive words at which a glued "GameMethod" cell is split.
pub const METHOD_START_KEYWORDS: &[&str] = &[
    "Rencontre",
    "Reset",
    "Surf",
    "Pêche",
    "Sandwich",
    "Scanner",
    "Repousse",
];

/// Markers showing a method cell carries extra detail (level, item, buff).
pub const REFINEMENT_MARKERS: &[&str] = &["niv.", "repousse", "sandwich", "aura", "niveau"];

pub fn has_refinement_marker(method: &str) -> bool {
    let lower = method.to_lowercase();
    REFINEMENT_MARKERS.iter().any(|m| lower.contains(m))
}

/// Pokémon that cannot breed, so never get the synthetic Masuda entry.
const NON_BREEDABLE: &[&str] = &[
    "métamorphe",
    "ditto",
    "legendaire",
    "légendaire",
    "mythique",
    "mewtwo",
    "mew",
    "lugia",
    "ho-oh",
    "celebi",
    "kyogre",
    "groudon",
    "rayquaza",
    "jirachi",
    "deoxys",
    "dialga",
    "palkia",
    "giratina",
    "arceus",
    "zekrom",
    "reshiram",
    "kyurem",
    "xerneas",
    "yveltal",
    "zygarde",
    "solgaleo",
    "lunala",
    "necrozma",
    "zacian",
    "zamazenta",
    "éthernatos",
    "koraidon",
    "miraidon",
];

pub fn is_breedable(pokemon_name: &str) -> bool {
    let lower = pokemon_name.trim().to_lowercase();
    !NON_BREEDABLE.contains(&lower.as_str())
}

#[cfg(test)]
#[path = "tests/methods_tests.rs"]
mod tests;
