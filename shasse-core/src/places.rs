use crate::text::{fold_key, has_word_starting_with};

/// Words that identify a location name. Matched as a word prefix, so plurals
/// and compounds count ("Grottes", "Îles").
pub const PLACE_KEYWORDS: &[&str] = &[
    "route",
    "chemin",
    "cave",
    "grotte",
    "caverne",
    "zone",
    "parc",
    "mont",
    "forêt",
    "foret",
    "ville",
    "bourg",
    "village",
    "cité",
    "tour",
    "manoir",
    "val",
    "île",
    "ile",
    "lac",
    "plage",
    "bois",
    "mer",
    "océan",
    "tunnel",
    "safari",
    "désert",
    "marais",
    "rivière",
    "pont",
    "centrale",
    "ruines",
    "mine",
    "jardin",
    "prairie",
    "plaine",
    "falaise",
    "canyon",
    "dojo",
    "temple",
    "colline",
    "glacier",
    "volcan",
    "source",
    "sentier",
    "bassin",
    "domaine",
];

/// Location text that carries no information.
pub const LOCATION_PLACEHOLDERS: &[&str] =
    &["non spécifié", "autre", "???", "n/a", "", "-", "inconnu"];

pub fn has_place_keyword(text: &str) -> bool {
    PLACE_KEYWORDS
        .iter()
        .any(|keyword| has_word_starting_with(text, keyword))
}

pub fn is_placeholder_location(text: &str) -> bool {
    let key = fold_key(text);
    LOCATION_PLACEHOLDERS.contains(&key.as_str())
}
