//! Shiny-lock detection from page text.
//!
//! This is a phrase heuristic. It only reports `Locked` or `Unlocked` when the
//! page says so, and `Unknown` otherwise.

use scraper::Html;
use shasse_catalog::ShinyLock;

use crate::extract::page_text;

const LOCK_PHRASES: &[&str] = &[
    "shiny lock",
    "shiny-lock",
    "impossible à obtenir en chromatique",
    "aucune méthode de shasse",
    "non shassable",
    "shasse impossible",
];

const AVAILABLE_PHRASES: &[&str] = &[
    "méthode de shasse",
    "taux de shiny",
    "probabilité de shiny",
    "combo capture",
    "masuda",
    "charme chroma",
    "shassable",
    "obtenir en chromatique",
    "capturer en chromatique",
];

/// A lock phrase only counts on a line that is about this Pokémon.
fn line_is_about(line: &str, name: &str) -> bool {
    (!name.is_empty() && line.contains(name))
        || line.contains("ce pokémon")
        || line.contains("ce pokemon")
        || (line.contains("impossible") && line.contains("chromatique"))
}

fn line_locks(line: &str, name: &str) -> bool {
    LOCK_PHRASES.iter().any(|p| line.contains(p)) && line_is_about(line, name)
}

/// Whether the page text says this Pokémon is shiny locked.
pub fn detect_shiny_lock(page_text: &str, pokemon_name: &str) -> ShinyLock {
    let text = page_text.to_lowercase();
    let name = pokemon_name.trim().to_lowercase();

    if text.lines().any(|line| line_locks(line, &name)) {
        log::debug!("{}: shiny lock phrase found", pokemon_name);
        return ShinyLock::Locked;
    }

    // "non shassable" contains "shassable", but it was handled above only when
    // the line was about this Pokémon. Strip it before looking for positives.
    let cleaned = text.replace("non shassable", "");
    if AVAILABLE_PHRASES.iter().any(|p| cleaned.contains(p)) {
        ShinyLock::Unlocked
    } else {
        ShinyLock::Unknown
    }
}

/// Parse a raw page and run [`detect_shiny_lock`] on its text.
pub fn detect_shiny_lock_html(html: &str, pokemon_name: &str) -> ShinyLock {
    detect_shiny_lock(&page_text(&Html::parse_document(html)), pokemon_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_phrase_with_name_is_locked() {
        let text = "Présentation\nVictini est shiny lock dans tous les jeux.\n";
        assert_eq!(detect_shiny_lock(text, "Victini"), ShinyLock::Locked);
    }

    #[test]
    fn lock_phrase_about_another_pokemon_is_ignored() {
        let text = "Zarude est shiny lock.\nMéthode de shasse : Masuda";
        assert_eq!(detect_shiny_lock(text, "Bulbizarre"), ShinyLock::Unlocked);
    }

    #[test]
    fn generic_impossible_line_locks() {
        let text = "Il est impossible à obtenir en chromatique.";
        assert_eq!(detect_shiny_lock(text, "Meloetta"), ShinyLock::Locked);
    }

    #[test]
    fn ce_pokemon_line_locks() {
        let text = "Ce Pokémon est non shassable.";
        assert_eq!(detect_shiny_lock(text, "Hoopa"), ShinyLock::Locked);
    }

    #[test]
    fn positive_indicator_is_unlocked() {
        let text = "Taux de shiny : 1/4096 avec le Charme Chroma";
        assert_eq!(detect_shiny_lock(text, "Pikachu"), ShinyLock::Unlocked);
    }

    #[test]
    fn no_evidence_is_unknown() {
        assert_eq!(detect_shiny_lock("Page en construction", "Pikachu"), ShinyLock::Unknown);
        assert_eq!(detect_shiny_lock("", "Pikachu"), ShinyLock::Unknown);
    }

    #[test]
    fn stray_non_shassable_is_not_a_positive() {
        let text = "Zarude est non shassable.";
        assert_eq!(detect_shiny_lock(text, "Pikachu"), ShinyLock::Unknown);
    }

    #[test]
    fn name_in_inline_markup_shares_the_lock_line() {
        let html = "<p>Utilisez le <b>Charme</b> Chroma.</p>\
                    <p><b>Mewtwo</b> est shiny lock dans tous les jeux.</p>";
        assert_eq!(detect_shiny_lock_html(html, "Mewtwo"), ShinyLock::Locked);
        assert_eq!(detect_shiny_lock_html(html, "Pikachu"), ShinyLock::Unlocked);
    }

    #[test]
    fn lock_in_another_paragraph_does_not_count() {
        let html = "<p>Zarude</p><p>Ce légendaire est shiny lock.</p>";
        assert_eq!(detect_shiny_lock_html(html, "Zarude"), ShinyLock::Unknown);
    }

    #[test]
    fn raw_html_is_parsed_first() {
        let html = "<html><body><h1>Mew</h1><p>Mew est shiny lock.</p></body></html>";
        assert_eq!(detect_shiny_lock_html(html, "Mew"), ShinyLock::Locked);
    }
}
